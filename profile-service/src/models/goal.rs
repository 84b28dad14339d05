use super::fields;
use crate::services::StoredDocument;
use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};

/// A financial goal. Every field is text on the wire even though stored
/// documents may hold numbers or dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub goal_amount: String,
    pub goal_description: String,
    pub goal_line: String,
    pub goal_timeline: String,
    pub goal_set_date: String,
}

impl Goal {
    pub fn from_document(stored: &StoredDocument) -> Self {
        let data = &stored.fields;
        Self {
            id: stored.id.clone(),
            goal_amount: fields::amount(data, "goal_amount"),
            goal_description: fields::text(data, "goal_description"),
            goal_line: fields::text(data, "goal_line"),
            goal_timeline: fields::timeline(data, "goal_timeline"),
            goal_set_date: fields::date(data, "goal_set_date"),
        }
    }

    pub fn to_document(&self) -> Document {
        doc! {
            "goal_amount": self.goal_amount.as_str(),
            "goal_description": self.goal_description.as_str(),
            "goal_line": self.goal_line.as_str(),
            "goal_timeline": self.goal_timeline.as_str(),
            "goal_set_date": self.goal_set_date.as_str(),
        }
    }
}
