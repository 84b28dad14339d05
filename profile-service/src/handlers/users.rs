use crate::dtos::{RegisterUserRequest, UserRegisteredResponse};
use crate::handlers::{store_failure, user_not_found};
use crate::models::User;
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

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let documents = state
        .store
        .list_users()
        .await
        .map_err(store_failure("Failed to fetch users"))?;

    if documents.is_empty() {
        return Err(AppError::not_found("No users found", Vec::new()));
    }

    Ok(Json(documents.iter().map(User::from_document).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, AppError> {
    let document = state
        .store
        .get_user(&user_id)
        .await
        .map_err(store_failure("Failed to fetch user"))?
        .ok_or_else(|| user_not_found(&user_id))?;

    Ok(Json(User::from_document(&document)))
}

/// Create or overwrite the user stored under `user_id`.
pub async fn register_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedJson(request): ValidatedJson<RegisterUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = request.into_user(user_id);

    state
        .store
        .set_user(&user.id, user.to_document())
        .await
        .map_err(store_failure("Failed to save user data"))?;

    metrics::record_user_registered();
    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(UserRegisteredResponse::from(user))))
}
