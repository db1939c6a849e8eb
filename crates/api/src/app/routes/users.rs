use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};

use serieshub_auth::{hash_password, policy};
use serieshub_catalog::{CreateUserAccount, UpdateUserAccount};
use serieshub_core::{DomainError, RecordId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::guard::with_policy;

/// User routes, each method guarded by its declared policy.
pub fn router() -> Router {
    let create = with_policy(
        Router::new().route("/", post(create_user)),
        [policy::CREATE_USERS],
    );
    let read = with_policy(
        Router::new()
            .route("/", get(list_users))
            .route("/:id", get(get_user)),
        [policy::READ_USERS],
    );
    let update = with_policy(
        Router::new().route("/:id", patch(update_user)),
        [policy::UPDATE_USERS],
    );
    let remove = with_policy(
        Router::new().route("/:id", delete(delete_user)),
        [policy::DELETE_USERS],
    );

    create.merge(read).merge(update).merge(remove)
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateUserRequest>,
) -> axum::response::Response {
    tracing::info!("creating user");

    // The record service only ever sees the hash.
    let password_hash = match hash_password(&body.password) {
        Ok(hash) => hash,
        Err(err) => {
            tracing::error!(error = %err, "failed to hash password");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            );
        }
    };

    let input = CreateUserAccount {
        username: body.username,
        password_hash,
        first_name: body.first_name,
        last_name: body.last_name,
        role: body.role,
    };

    match services.users.create(input) {
        Ok(account) => {
            tracing::debug!(id = %account.id, "user created");
            (StatusCode::CREATED, Json(dto::UserResponse::from(account))).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to create user");
            errors::domain_error_to_response(err)
        }
    }
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items: Vec<dto::UserResponse> = services
        .users
        .list()
        .into_iter()
        .map(dto::UserResponse::from)
        .collect();

    tracing::debug!(count = items.len(), "fetched users");
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RecordId = match id.parse() {
        Ok(id) => id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    match services.users.get(id) {
        Some(account) => (StatusCode::OK, Json(dto::UserResponse::from(account))).into_response(),
        None => {
            tracing::warn!(%id, "user not found");
            errors::domain_error_to_response(DomainError::NotFound)
        }
    }
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateUserRequest>,
) -> axum::response::Response {
    let id: RecordId = match id.parse() {
        Ok(id) => id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    let password_hash = match body.password {
        Some(password) => match hash_password(&password) {
            Ok(hash) => Some(hash),
            Err(err) => {
                tracing::error!(error = %err, "failed to hash password");
                return errors::json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error",
                );
            }
        },
        None => None,
    };

    let input = UpdateUserAccount {
        username: body.username,
        password_hash,
        first_name: body.first_name,
        last_name: body.last_name,
        role: body.role,
    };

    match services.users.update(id, input) {
        Ok(account) => (StatusCode::OK, Json(dto::UserResponse::from(account))).into_response(),
        Err(err) => {
            tracing::error!(%id, error = %err, "failed to update user");
            errors::domain_error_to_response(err)
        }
    }
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RecordId = match id.parse() {
        Ok(id) => id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    match services.users.remove(id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => {
            tracing::warn!(%id, "user not found for delete");
            errors::domain_error_to_response(DomainError::NotFound)
        }
    }
}
