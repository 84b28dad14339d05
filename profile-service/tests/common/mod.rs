#![allow(dead_code)]

use async_trait::async_trait;
use mongodb::bson::Document;
use profile_service::config::ProfileConfig;
use profile_service::services::{DocumentStore, InMemoryStore, StoredDocument};
use profile_service::startup::Application;
use serde_json::{json, Value};
use std::sync::Arc;

pub const TEST_ORIGIN: &str = "http://localhost:5173";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryStore>,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the app on a random port over a fresh in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with_config(ProfileConfig::in_memory()).await
    }

    pub async fn spawn_with_config(config: ProfileConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let address = spawn_server(config, store.clone()).await;
        let port = port_of(&address);

        TestApp {
            address,
            port,
            store,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn register_user(&self, user_id: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(&format!("/users/{}", user_id)))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn register_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        body: &Value,
    ) -> reqwest::Response {
        self.client
            .post(self.url(&format!("/users/{}/goal_info/{}", user_id, goal_id)))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Bind the app around `store` and return its base address once `/health` answers.
pub async fn spawn_server(mut config: ProfileConfig, store: Arc<dyn DocumentStore>) -> String {
    config.common.port = 0; // Random port for testing

    let app = Application::build_with_store(config, store)
        .await
        .expect("Failed to build test application");

    let port = app.port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    let client = reqwest::Client::new();
    let health_url = format!("{}/health", address);
    for _ in 0..50 {
        if client.get(&health_url).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }

    address
}

fn port_of(address: &str) -> u16 {
    address
        .rsplit(':')
        .next()
        .and_then(|port| port.parse().ok())
        .expect("address has a port")
}

pub fn user_body() -> Value {
    json!({
        "name": "Asha Rao",
        "age": 31,
        "email": "asha@example.com",
        "mobile_no": "9876543210",
        "preferred_language": "English",
        "marital_status": "married",
        "city": "Bengaluru",
        "career_stage": "mid-career"
    })
}

pub fn goal_body() -> Value {
    json!({
        "goal_amount": "2500000",
        "goal_description": "Down payment for a flat",
        "goal_line": "property",
        "goal_timeline": "36",
        "goal_set_date": "2024-01-15"
    })
}

/// Store whose every call fails, for exercising the 500 and 503 paths.
pub struct FailingStore;

fn unavailable<T>() -> anyhow::Result<T> {
    Err(anyhow::anyhow!("document store unavailable"))
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn list_users(&self) -> anyhow::Result<Vec<StoredDocument>> {
        unavailable()
    }

    async fn get_user(&self, _user_id: &str) -> anyhow::Result<Option<StoredDocument>> {
        unavailable()
    }

    async fn set_user(&self, _user_id: &str, _fields: Document) -> anyhow::Result<()> {
        unavailable()
    }

    async fn list_goals(&self, _user_id: &str) -> anyhow::Result<Vec<StoredDocument>> {
        unavailable()
    }

    async fn get_goal(
        &self,
        _user_id: &str,
        _goal_id: &str,
    ) -> anyhow::Result<Option<StoredDocument>> {
        unavailable()
    }

    async fn set_goal(
        &self,
        _user_id: &str,
        _goal_id: &str,
        _fields: Document,
    ) -> anyhow::Result<()> {
        unavailable()
    }

    async fn get_goal_status(
        &self,
        _user_id: &str,
        _goal_id: &str,
        _status_id: &str,
    ) -> anyhow::Result<Option<StoredDocument>> {
        unavailable()
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        unavailable()
    }
}

/// Store operation that [`FlakyStore`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    GetUser,
    ListGoals,
    GetGoal,
    GetGoalStatus,
}

/// In-memory store that fails exactly one operation, so handlers can be
/// driven past their earlier lookups into a later failure.
pub struct FlakyStore {
    inner: InMemoryStore,
    failing: StoreOp,
}

impl FlakyStore {
    pub fn new(inner: InMemoryStore, failing: StoreOp) -> Self {
        Self { inner, failing }
    }

    fn check(&self, op: StoreOp) -> anyhow::Result<()> {
        if self.failing == op {
            return unavailable();
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn list_users(&self) -> anyhow::Result<Vec<StoredDocument>> {
        self.inner.list_users().await
    }

    async fn get_user(&self, user_id: &str) -> anyhow::Result<Option<StoredDocument>> {
        self.check(StoreOp::GetUser)?;
        self.inner.get_user(user_id).await
    }

    async fn set_user(&self, user_id: &str, fields: Document) -> anyhow::Result<()> {
        self.inner.set_user(user_id, fields).await
    }

    async fn list_goals(&self, user_id: &str) -> anyhow::Result<Vec<StoredDocument>> {
        self.check(StoreOp::ListGoals)?;
        self.inner.list_goals(user_id).await
    }

    async fn get_goal(
        &self,
        user_id: &str,
        goal_id: &str,
    ) -> anyhow::Result<Option<StoredDocument>> {
        self.check(StoreOp::GetGoal)?;
        self.inner.get_goal(user_id, goal_id).await
    }

    async fn set_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        fields: Document,
    ) -> anyhow::Result<()> {
        self.inner.set_goal(user_id, goal_id, fields).await
    }

    async fn get_goal_status(
        &self,
        user_id: &str,
        goal_id: &str,
        status_id: &str,
    ) -> anyhow::Result<Option<StoredDocument>> {
        self.check(StoreOp::GetGoalStatus)?;
        self.inner.get_goal_status(user_id, goal_id, status_id).await
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        self.inner.health_check().await
    }
}

/// Spawn the app over a store holding user `user-1` with goal `house` and
/// status `latest`, where `failing` always errors.
pub async fn spawn_flaky(failing: StoreOp) -> String {
    let inner = InMemoryStore::new();
    inner
        .set_user("user-1", mongodb::bson::doc! { "name": "Asha Rao" })
        .await
        .expect("Failed to seed user");
    inner
        .set_goal("user-1", "house", mongodb::bson::doc! { "goal_line": "property" })
        .await
        .expect("Failed to seed goal");
    inner
        .put_goal_status("user-1", "house", "latest", "<h1>On track</h1>")
        .expect("Failed to seed goal status");

    spawn_server(
        ProfileConfig::in_memory(),
        Arc::new(FlakyStore::new(inner, failing)),
    )
    .await
}

/// Spawn the app over [`FailingStore`].
pub async fn spawn_failing() -> String {
    spawn_server(ProfileConfig::in_memory(), Arc::new(FailingStore)).await
}
