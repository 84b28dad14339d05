use serde::Serialize;
use std::collections::BTreeMap;

/// Body of `GET /`: a self-description for API consumers.
#[derive(Debug, Serialize)]
pub struct ApiInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

impl ApiInfo {
    pub fn current() -> Self {
        let endpoints = BTreeMap::from([
            ("health", "GET /health"),
            ("ready", "GET /ready"),
            ("metrics", "GET /metrics"),
            ("dashboard", "GET /dashboard"),
            ("user_dashboard", "GET /dashboard/:user_id"),
            ("users", "GET /users"),
            ("user_by_id", "GET /users/:user_id"),
            ("register_user", "POST /users/:user_id"),
            ("user_goals", "GET /users/:user_id/goal_info"),
            ("specific_goal", "GET /users/:user_id/goal_info/:goal_id"),
            ("register_goal", "POST /users/:user_id/goal_info/:goal_id"),
            (
                "goal_dashboard",
                "GET /users/:user_id/goal_info/:goal_id/status/:status_id",
            ),
        ]);

        Self {
            service: "profile-service",
            version: env!("CARGO_PKG_VERSION"),
            description: "REST API for user profiles and financial goals",
            endpoints,
        }
    }
}
