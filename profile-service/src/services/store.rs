use async_trait::async_trait;
use mongodb::bson::Document;

/// A document as the handlers see it: its key plus its data fields, with any
/// backend bookkeeping (`_id`, parent keys) already stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Document,
}

/// The hosted document store behind the API.
///
/// Users are keyed by user id, goals by `(user_id, goal_id)` and goal status
/// dashboards by `(user_id, goal_id, status_id)`. `set_*` operations replace
/// the whole document; nothing is merged. Listings are ordered by key.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_users(&self) -> anyhow::Result<Vec<StoredDocument>>;

    async fn get_user(&self, user_id: &str) -> anyhow::Result<Option<StoredDocument>>;

    async fn set_user(&self, user_id: &str, fields: Document) -> anyhow::Result<()>;

    async fn list_goals(&self, user_id: &str) -> anyhow::Result<Vec<StoredDocument>>;

    async fn get_goal(
        &self,
        user_id: &str,
        goal_id: &str,
    ) -> anyhow::Result<Option<StoredDocument>>;

    async fn set_goal(&self, user_id: &str, goal_id: &str, fields: Document)
        -> anyhow::Result<()>;

    async fn get_goal_status(
        &self,
        user_id: &str,
        goal_id: &str,
        status_id: &str,
    ) -> anyhow::Result<Option<StoredDocument>>;

    async fn health_check(&self) -> anyhow::Result<()>;
}
