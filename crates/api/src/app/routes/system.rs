use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Echo the authenticated principal.
///
/// Deliberately carries no policy declaration: any authenticated principal
/// may ask who they are.
pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "principal_id": principal.principal_id().to_string(),
        "username": principal.username(),
        "role": principal.role().as_str(),
    }))
}
