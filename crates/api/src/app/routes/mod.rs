use axum::{Router, routing::get};

pub mod auth;
pub mod series;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/series", series::router())
        .nest("/users", users::router())
}
