use super::fields;
use crate::services::StoredDocument;

/// Pre-rendered dashboard for one status snapshot of a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalStatus {
    pub id: String,
    pub html: String,
}

impl GoalStatus {
    pub fn from_document(stored: &StoredDocument) -> Self {
        Self {
            id: stored.id.clone(),
            html: fields::text(&stored.fields, "html"),
        }
    }

    pub fn has_content(&self) -> bool {
        !self.html.trim().is_empty()
    }
}
