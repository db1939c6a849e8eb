use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};

use serieshub_auth::policy;
use serieshub_catalog::{CreateSeries, UpdateSeries};
use serieshub_core::{DomainError, RecordId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::guard::with_policy;

/// Series routes, each method guarded by its declared policy.
pub fn router() -> Router {
    let create = with_policy(
        Router::new().route("/", post(create_series)),
        [policy::CREATE_SERIES],
    );
    let read = with_policy(
        Router::new()
            .route("/", get(list_series))
            .route("/:id", get(get_series)),
        [policy::READ_SERIES],
    );
    let update = with_policy(
        Router::new().route("/:id", patch(update_series)),
        [policy::UPDATE_SERIES],
    );
    let remove = with_policy(
        Router::new().route("/:id", delete(delete_series)),
        [policy::DELETE_SERIES],
    );

    create.merge(read).merge(update).merge(remove)
}

pub async fn create_series(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateSeriesRequest>,
) -> axum::response::Response {
    tracing::info!("creating series");

    match services.series.create(CreateSeries { name: body.name }) {
        Ok(series) => {
            tracing::debug!(id = %series.id, "series created");
            (StatusCode::CREATED, Json(dto::SeriesResponse::from(series))).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to create series");
            errors::domain_error_to_response(err)
        }
    }
}

pub async fn list_series(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items: Vec<dto::SeriesResponse> = services
        .series
        .list()
        .into_iter()
        .map(dto::SeriesResponse::from)
        .collect();

    tracing::debug!(count = items.len(), "fetched series");
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn get_series(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RecordId = match id.parse() {
        Ok(id) => id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    match services.series.get(id) {
        Some(series) => (StatusCode::OK, Json(dto::SeriesResponse::from(series))).into_response(),
        None => {
            tracing::warn!(%id, "series not found");
            errors::domain_error_to_response(DomainError::NotFound)
        }
    }
}

pub async fn update_series(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateSeriesRequest>,
) -> axum::response::Response {
    let id: RecordId = match id.parse() {
        Ok(id) => id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    match services.series.update(id, UpdateSeries { name: body.name }) {
        Ok(series) => (StatusCode::OK, Json(dto::SeriesResponse::from(series))).into_response(),
        Err(err) => {
            tracing::error!(%id, error = %err, "failed to update series");
            errors::domain_error_to_response(err)
        }
    }
}

pub async fn delete_series(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RecordId = match id.parse() {
        Ok(id) => id,
        Err(err) => return errors::domain_error_to_response(err),
    };

    match services.series.remove(id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => {
            tracing::warn!(%id, "series not found for delete");
            errors::domain_error_to_response(DomainError::NotFound)
        }
    }
}
