use std::sync::Arc;

use serieshub_auth::{Hs256JwtValidator, Role, hash_password};
use serieshub_catalog::{CreateUserAccount, SeriesStore, UserStore};

/// Shared application services injected into handlers.
pub struct AppServices {
    pub series: SeriesStore,
    pub users: UserStore,
    pub tokens: Arc<Hs256JwtValidator>,
}

impl AppServices {
    pub fn new(tokens: Arc<Hs256JwtValidator>) -> Self {
        Self {
            series: SeriesStore::new(),
            users: UserStore::new(),
            tokens,
        }
    }

    /// Seed the bootstrap administrator account, if not already present.
    ///
    /// A fresh deployment needs one account that can mint tokens; everything
    /// else can then be created through the API.
    pub fn seed_admin(&self, username: &str, password: &str) {
        if self.users.find_by_username(username).is_some() {
            tracing::debug!(%username, "bootstrap administrator already present");
            return;
        }

        let password_hash = match hash_password(password) {
            Ok(hash) => hash,
            Err(err) => {
                tracing::error!(error = %err, "failed to hash bootstrap administrator password");
                return;
            }
        };

        let account = CreateUserAccount {
            username: username.to_string(),
            password_hash,
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
            role: Role::Administrator,
        };

        match self.users.create(account) {
            Ok(user) => {
                tracing::info!(id = %user.id, %username, "seeded bootstrap administrator");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to seed bootstrap administrator");
            }
        }
    }
}
