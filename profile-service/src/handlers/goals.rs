use crate::dtos::{GoalRegisteredResponse, RegisterGoalRequest};
use crate::handlers::{ensure_user_exists, goal_not_found, store_failure};
use crate::models::Goal;
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

/// All goals of a user; an existing user without goals gets `[]`.
pub async fn list_goals(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Goal>>, AppError> {
    ensure_user_exists(state.store.as_ref(), &user_id).await?;

    let documents = state
        .store
        .list_goals(&user_id)
        .await
        .map_err(store_failure("Failed to fetch goals"))?;

    Ok(Json(documents.iter().map(Goal::from_document).collect()))
}

pub async fn get_goal(
    State(state): State<AppState>,
    Path((user_id, goal_id)): Path<(String, String)>,
) -> Result<Json<Goal>, AppError> {
    ensure_user_exists(state.store.as_ref(), &user_id).await?;

    let document = state
        .store
        .get_goal(&user_id, &goal_id)
        .await
        .map_err(store_failure("Failed to fetch goal"))?
        .ok_or_else(|| goal_not_found(&user_id, &goal_id))?;

    Ok(Json(Goal::from_document(&document)))
}

/// Create or overwrite a goal. The owning user is checked before the body is
/// looked at, so an unknown user is a 404 even when the body is invalid.
pub async fn register_goal(
    State(state): State<AppState>,
    Path((user_id, goal_id)): Path<(String, String)>,
    body: Result<ValidatedJson<RegisterGoalRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    ensure_user_exists(state.store.as_ref(), &user_id).await?;
    let ValidatedJson(request) = body?;

    let goal = request.into_goal(goal_id);

    state
        .store
        .set_goal(&user_id, &goal.id, goal.to_document())
        .await
        .map_err(store_failure("Failed to save goal data"))?;

    metrics::record_goal_registered();
    tracing::info!(user_id = %user_id, goal_id = %goal.id, "Goal registered");

    Ok((StatusCode::CREATED, Json(GoalRegisteredResponse::from(goal))))
}
