use crate::services::{DocumentStore, StoredDocument};
use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Collections {
    users: BTreeMap<String, Document>,
    goals: BTreeMap<(String, String), Document>,
    goal_statuses: BTreeMap<(String, String, String), Document>,
}

/// Process-local store for development and tests. Same keying and overwrite
/// semantics as [`super::MongoStore`]; ordered maps give key-ordered listings.
#[derive(Default)]
pub struct InMemoryStore {
    collections: Mutex<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Collections>> {
        self.collections
            .lock()
            .map_err(|e| anyhow::anyhow!("In-memory store mutex poisoned: {}", e))
    }

    /// Seed a goal dashboard. Statuses are produced outside this service, so
    /// the store trait has no write path for them.
    pub fn put_goal_status(
        &self,
        user_id: &str,
        goal_id: &str,
        status_id: &str,
        html: &str,
    ) -> anyhow::Result<()> {
        self.lock()?.goal_statuses.insert(
            (
                user_id.to_string(),
                goal_id.to_string(),
                status_id.to_string(),
            ),
            doc! { "html": html },
        );
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list_users(&self) -> anyhow::Result<Vec<StoredDocument>> {
        Ok(self
            .lock()?
            .users
            .iter()
            .map(|(id, fields)| StoredDocument {
                id: id.clone(),
                fields: fields.clone(),
            })
            .collect())
    }

    async fn get_user(&self, user_id: &str) -> anyhow::Result<Option<StoredDocument>> {
        Ok(self
            .lock()?
            .users
            .get(user_id)
            .map(|fields| StoredDocument {
                id: user_id.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn set_user(&self, user_id: &str, fields: Document) -> anyhow::Result<()> {
        self.lock()?.users.insert(user_id.to_string(), fields);
        Ok(())
    }

    async fn list_goals(&self, user_id: &str) -> anyhow::Result<Vec<StoredDocument>> {
        Ok(self
            .lock()?
            .goals
            .iter()
            .filter(|((owner, _), _)| owner == user_id)
            .map(|((_, goal_id), fields)| StoredDocument {
                id: goal_id.clone(),
                fields: fields.clone(),
            })
            .collect())
    }

    async fn get_goal(
        &self,
        user_id: &str,
        goal_id: &str,
    ) -> anyhow::Result<Option<StoredDocument>> {
        let key = (user_id.to_string(), goal_id.to_string());
        Ok(self.lock()?.goals.get(&key).map(|fields| StoredDocument {
            id: goal_id.to_string(),
            fields: fields.clone(),
        }))
    }

    async fn set_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        fields: Document,
    ) -> anyhow::Result<()> {
        self.lock()?
            .goals
            .insert((user_id.to_string(), goal_id.to_string()), fields);
        Ok(())
    }

    async fn get_goal_status(
        &self,
        user_id: &str,
        goal_id: &str,
        status_id: &str,
    ) -> anyhow::Result<Option<StoredDocument>> {
        let key = (
            user_id.to_string(),
            goal_id.to_string(),
            status_id.to_string(),
        );
        Ok(self
            .lock()?
            .goal_statuses
            .get(&key)
            .map(|fields| StoredDocument {
                id: status_id.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        self.lock().map(|_| ())
    }
}
