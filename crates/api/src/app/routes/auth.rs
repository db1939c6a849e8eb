//! Login: the designated authentication-exempt endpoint.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;

use serieshub_auth::{Principal, PrincipalId, verify_password};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/login", post(login))
}

/// Exchange a username/password pair for a signed bearer token.
///
/// Failures are a uniform 401 regardless of whether the username exists.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    tracing::debug!(username = %body.username, "validating credentials");

    let Some(account) = services.users.find_by_username(&body.username) else {
        tracing::warn!(username = %body.username, "login for unknown username");
        return invalid_credentials();
    };

    match verify_password(&body.password, &account.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(username = %body.username, "login with wrong password");
            return invalid_credentials();
        }
        Err(err) => {
            tracing::error!(error = %err, "password verification failed");
            return invalid_credentials();
        }
    }

    let principal = Principal {
        id: PrincipalId::from_uuid(*account.id.as_uuid()),
        username: account.username.clone(),
        role: account.role,
    };

    match services.tokens.issue(&principal, Utc::now()) {
        Ok(access_token) => {
            tracing::info!(username = %principal.username, "issued token");
            (StatusCode::OK, Json(dto::LoginResponse { access_token })).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to issue token");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            )
        }
    }
}

fn invalid_credentials() -> axum::response::Response {
    errors::json_error(
        StatusCode::UNAUTHORIZED,
        "invalid_credentials",
        "invalid username or password",
    )
}
