pub mod dashboard;
pub mod goals;
pub mod health;
pub mod info;
pub mod users;

pub use dashboard::{goal_dashboard, static_dashboard, user_dashboard};
pub use goals::{get_goal, list_goals, register_goal};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use info::api_info;
pub use users::{get_user, list_users, register_user};

use crate::services::{metrics, DocumentStore};
use service_core::error::AppError;

/// Map a store error to a 500 that names the failed operation.
pub(crate) fn store_failure(operation: &'static str) -> impl FnOnce(anyhow::Error) -> AppError {
    move |e| {
        metrics::record_store_error(operation);
        AppError::database(operation, e)
    }
}

pub(crate) fn user_not_found(user_id: &str) -> AppError {
    AppError::not_found("User not found", vec![("user_id", user_id.to_string())])
}

pub(crate) fn goal_not_found(user_id: &str, goal_id: &str) -> AppError {
    AppError::not_found(
        "Goal not found",
        vec![
            ("user_id", user_id.to_string()),
            ("goal_id", goal_id.to_string()),
        ],
    )
}

/// Goal routes live under a user; a missing parent is a 404 before anything else.
pub(crate) async fn ensure_user_exists(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<(), AppError> {
    store
        .get_user(user_id)
        .await
        .map_err(store_failure("Failed to verify user"))?
        .map(|_| ())
        .ok_or_else(|| user_not_found(user_id))
}
