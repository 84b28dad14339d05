use crate::services::{DocumentStore, StoredDocument};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::{ClientOptions, FindOptions, IndexOptions, ReplaceOptions},
    Client as MongoClient, Collection, Cursor, Database, IndexModel,
};
use secrecy::{ExposeSecret, Secret};
use service_core::error::AppError;

const USERS: &str = "users";
const GOALS: &str = "goal_info";
const GOAL_STATUSES: &str = "goal_status";

/// MongoDB-backed store. Goals and statuses live in their own collections,
/// keyed by the ids of their parents.
#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &Secret<String>, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let mut client_options = ClientOptions::parse(uri.expose_secret())
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse MongoDB connection string: {}", e);
                AppError::from(e)
            })?;
        client_options.app_name = Some("profile-service".to_string());

        let client = MongoClient::with_options(client_options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for profile-service");

        let goal_key_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "goal_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("user_goal_lookup".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.goals()
            .create_index(goal_key_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create index on {} collection: {}", GOALS, e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on goal_info.(user_id, goal_id)");

        let status_key_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "goal_id": 1, "status_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("goal_status_lookup".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.goal_statuses()
            .create_index(status_key_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create index on {} collection: {}",
                    GOAL_STATUSES,
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created index on goal_status.(user_id, goal_id, status_id)");

        Ok(())
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn users(&self) -> Collection<Document> {
        self.db.collection(USERS)
    }

    fn goals(&self) -> Collection<Document> {
        self.db.collection(GOALS)
    }

    fn goal_statuses(&self) -> Collection<Document> {
        self.db.collection(GOAL_STATUSES)
    }
}

/// Pull the document key out of `key_field` and drop the bookkeeping fields.
fn into_stored(mut raw: Document, key_field: &str, bookkeeping: &[&str]) -> StoredDocument {
    let id = match raw.remove(key_field) {
        Some(Bson::String(id)) => id,
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    for field in bookkeeping {
        raw.remove(*field);
    }
    StoredDocument { id, fields: raw }
}

async fn collect(
    mut cursor: Cursor<Document>,
    key_field: &str,
    bookkeeping: &[&str],
) -> anyhow::Result<Vec<StoredDocument>> {
    let mut documents = Vec::new();
    while let Some(raw) = cursor.try_next().await? {
        documents.push(into_stored(raw, key_field, bookkeeping));
    }
    Ok(documents)
}

fn upsert() -> ReplaceOptions {
    ReplaceOptions::builder().upsert(true).build()
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn list_users(&self) -> anyhow::Result<Vec<StoredDocument>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let cursor = self.users().find(None, options).await?;
        collect(cursor, "_id", &[]).await
    }

    async fn get_user(&self, user_id: &str) -> anyhow::Result<Option<StoredDocument>> {
        let raw = self.users().find_one(doc! { "_id": user_id }, None).await?;
        Ok(raw.map(|raw| into_stored(raw, "_id", &[])))
    }

    async fn set_user(&self, user_id: &str, mut fields: Document) -> anyhow::Result<()> {
        fields.insert("_id", user_id);
        self.users()
            .replace_one(doc! { "_id": user_id }, fields, upsert())
            .await?;
        Ok(())
    }

    async fn list_goals(&self, user_id: &str) -> anyhow::Result<Vec<StoredDocument>> {
        let options = FindOptions::builder().sort(doc! { "goal_id": 1 }).build();
        let cursor = self
            .goals()
            .find(doc! { "user_id": user_id }, options)
            .await?;
        collect(cursor, "goal_id", &["_id", "user_id"]).await
    }

    async fn get_goal(
        &self,
        user_id: &str,
        goal_id: &str,
    ) -> anyhow::Result<Option<StoredDocument>> {
        let raw = self
            .goals()
            .find_one(doc! { "user_id": user_id, "goal_id": goal_id }, None)
            .await?;
        Ok(raw.map(|raw| into_stored(raw, "goal_id", &["_id", "user_id"])))
    }

    async fn set_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        mut fields: Document,
    ) -> anyhow::Result<()> {
        fields.insert("user_id", user_id);
        fields.insert("goal_id", goal_id);
        self.goals()
            .replace_one(
                doc! { "user_id": user_id, "goal_id": goal_id },
                fields,
                upsert(),
            )
            .await?;
        Ok(())
    }

    async fn get_goal_status(
        &self,
        user_id: &str,
        goal_id: &str,
        status_id: &str,
    ) -> anyhow::Result<Option<StoredDocument>> {
        let raw = self
            .goal_statuses()
            .find_one(
                doc! { "user_id": user_id, "goal_id": goal_id, "status_id": status_id },
                None,
            )
            .await?;
        Ok(raw.map(|raw| into_stored(raw, "status_id", &["_id", "user_id", "goal_id"])))
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                e
            })?;
        Ok(())
    }
}
