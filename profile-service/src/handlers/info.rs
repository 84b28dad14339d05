use crate::dtos::ApiInfo;
use axum::Json;

pub async fn api_info() -> Json<ApiInfo> {
    Json(ApiInfo::current())
}
