//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: shared application services (record stores + token issuer)
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs and JSON mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use serieshub_auth::Hs256JwtValidator;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Application configuration consumed by [`build_app`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    /// Credentials for a seeded administrator account, if any.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

impl AppConfig {
    const DEFAULT_TTL_MINUTES: i64 = 60;

    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: chrono::Duration::minutes(Self::DEFAULT_TTL_MINUTES),
            bootstrap_admin: None,
        }
    }

    /// Read configuration from the environment.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let token_ttl = std::env::var("TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .map(chrono::Duration::minutes)
            .unwrap_or_else(|| chrono::Duration::minutes(Self::DEFAULT_TTL_MINUTES));

        let bootstrap_admin = match (
            std::env::var("ADMIN_USERNAME"),
            std::env::var("ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) => Some(BootstrapAdmin { username, password }),
            _ => None,
        };

        Self {
            jwt_secret,
            token_ttl,
            bootstrap_admin,
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: AppConfig) -> Router {
    let jwt = Arc::new(Hs256JwtValidator::with_ttl(
        config.jwt_secret.into_bytes(),
        config.token_ttl,
    ));
    let auth_state = middleware::AuthState { jwt: jwt.clone() };

    let services = Arc::new(services::AppServices::new(jwt));
    if let Some(admin) = &config.bootstrap_admin {
        services.seed_admin(&admin.username, &admin.password);
    }

    // Protected routes: require an authenticated principal.
    let protected = routes::router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    // Exempt routes: reachable without credentials.
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/auth", routes::auth::router().layer(Extension(services)))
        .merge(protected)
}
