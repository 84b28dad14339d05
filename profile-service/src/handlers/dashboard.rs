use crate::models::GoalStatus;
use crate::services::metrics;
use crate::startup::AppState;
use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use service_core::error::AppError;
use std::io::ErrorKind;

/// Failure page for browser-facing routes, where a JSON body is useless.
#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage {
    status: u16,
    title: &'static str,
    lines: Vec<String>,
}

struct HtmlError {
    status: StatusCode,
    title: &'static str,
    lines: Vec<String>,
}

impl HtmlError {
    fn not_found(title: &'static str, lines: Vec<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            title,
            lines,
        }
    }

    fn internal(message: &'static str, source: anyhow::Error) -> Self {
        metrics::record_store_error(message);
        tracing::error!(operation = message, error = %source, "Goal dashboard lookup failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            title: "Internal Server Error",
            lines: vec![message.to_string()],
        }
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let page = ErrorPage {
            status: self.status.as_u16(),
            title: self.title,
            lines: self.lines,
        };
        (self.status, page).into_response()
    }
}

/// Serve the stored HTML dashboard for one status snapshot of a goal.
pub async fn goal_dashboard(
    State(state): State<AppState>,
    Path((user_id, goal_id, status_id)): Path<(String, String, String)>,
) -> Response {
    match render_goal_dashboard(&state, &user_id, &goal_id, &status_id).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn render_goal_dashboard(
    state: &AppState,
    user_id: &str,
    goal_id: &str,
    status_id: &str,
) -> Result<String, HtmlError> {
    let user_line = format!("User ID: {}", user_id);
    let goal_line = format!("Goal ID: {}", goal_id);
    let status_line = format!("Status ID: {}", status_id);

    state
        .store
        .get_user(user_id)
        .await
        .map_err(|e| HtmlError::internal("Failed to verify user", e))?
        .ok_or_else(|| HtmlError::not_found("User Not Found", vec![user_line.clone()]))?;

    state
        .store
        .get_goal(user_id, goal_id)
        .await
        .map_err(|e| HtmlError::internal("Failed to verify goal", e))?
        .ok_or_else(|| {
            HtmlError::not_found(
                "Goal Not Found",
                vec![user_line.clone(), goal_line.clone()],
            )
        })?;

    let document = state
        .store
        .get_goal_status(user_id, goal_id, status_id)
        .await
        .map_err(|e| HtmlError::internal("Failed to fetch goal dashboard HTML", e))?
        .ok_or_else(|| {
            HtmlError::not_found(
                "Dashboard Not Found",
                vec![
                    "No HTML content available for this goal status".to_string(),
                    user_line.clone(),
                    goal_line.clone(),
                    status_line.clone(),
                ],
            )
        })?;

    let status = GoalStatus::from_document(&document);
    if !status.has_content() {
        return Err(HtmlError::not_found(
            "Content Not Found",
            vec![
                "HTML content not found or empty".to_string(),
                user_line,
                goal_line,
                status_line,
            ],
        ));
    }

    Ok(status.html)
}

/// `GET /dashboard`: the bundled single-page dashboard.
pub async fn static_dashboard(State(state): State<AppState>) -> Result<Response, AppError> {
    serve_dashboard_file(&state.config.dashboard.html_path).await
}

/// `GET /dashboard/{user_id}`: same page; the client reads the id from the URL.
pub async fn user_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, AppError> {
    tracing::debug!(user_id = %user_id, "Serving user dashboard");
    serve_dashboard_file(&state.config.dashboard.html_path).await
}

async fn serve_dashboard_file(path: &str) -> Result<Response, AppError> {
    match tokio::fs::read_to_string(path).await {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path, "Dashboard file is missing");
            Err(AppError::not_found("Dashboard not found", Vec::new()))
        }
        Err(e) => Err(AppError::from(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_page_escapes_markup_in_identifiers() {
        let page = ErrorPage {
            status: 404,
            title: "User Not Found",
            lines: vec!["User ID: <script>alert(1)</script>".to_string()],
        }
        .render()
        .unwrap();

        assert!(page.contains("Error 404: User Not Found"));
        assert!(page.contains("User ID: &lt;script&gt;alert(1)"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn internal_error_names_the_failed_operation() {
        let error = HtmlError::internal("Failed to verify goal", anyhow::anyhow!("timeout"));

        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.lines, vec!["Failed to verify goal".to_string()]);
    }
}
