use super::fields;
use crate::services::StoredDocument;
use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};

/// Stored key written by early clients, still present in older documents.
pub const LEGACY_MARITAL_STATUS_KEY: &str = "marrital_status";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "UserBody")]
pub struct User {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub email: String,
    pub mobile_no: String,
    pub preferred_language: String,
    pub marital_status: String,
    pub city: String,
    pub career_stage: String,
}

/// Response shape of [`User`]. Clients written against the old API read the
/// status from `marrital_status`, so it is emitted under both keys.
#[derive(Serialize)]
struct UserBody {
    id: String,
    name: String,
    age: i64,
    email: String,
    mobile_no: String,
    preferred_language: String,
    marital_status: String,
    #[serde(rename = "marrital_status")]
    legacy_marital_status: String,
    city: String,
    career_stage: String,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            legacy_marital_status: user.marital_status.clone(),
            id: user.id,
            name: user.name,
            age: user.age,
            email: user.email,
            mobile_no: user.mobile_no,
            preferred_language: user.preferred_language,
            marital_status: user.marital_status,
            city: user.city,
            career_stage: user.career_stage,
        }
    }
}

impl User {
    pub fn from_document(stored: &StoredDocument) -> Self {
        let data = &stored.fields;
        Self {
            id: stored.id.clone(),
            name: fields::text(data, "name"),
            age: fields::integer(data, "age"),
            email: fields::text(data, "email"),
            mobile_no: fields::text(data, "mobile_no"),
            preferred_language: fields::text(data, "preferred_language"),
            marital_status: fields::text_any(
                data,
                &["marital_status", LEGACY_MARITAL_STATUS_KEY],
            ),
            city: fields::text(data, "city"),
            career_stage: fields::text(data, "career_stage"),
        }
    }

    /// Stored form; the id lives in the document key, not in the fields.
    pub fn to_document(&self) -> Document {
        doc! {
            "name": self.name.as_str(),
            "age": self.age,
            "email": self.email.as_str(),
            "mobile_no": self.mobile_no.as_str(),
            "preferred_language": self.preferred_language.as_str(),
            "marital_status": self.marital_status.as_str(),
            "city": self.city.as_str(),
            "career_stage": self.career_stage.as_str(),
        }
    }
}
