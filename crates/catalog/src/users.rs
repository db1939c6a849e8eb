use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use serieshub_auth::Role;
use serieshub_core::{DomainError, DomainResult, RecordId};

/// A stored user account.
///
/// `password_hash` is an opaque PHC string; hashing and verification happen
/// at the API boundary, never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: RecordId,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct CreateUserAccount {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserAccount {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
}

/// In-memory user account store.
///
/// Usernames are unique across the store.
#[derive(Debug, Default)]
pub struct UserStore {
    records: RwLock<HashMap<RecordId, UserAccount>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, input: CreateUserAccount) -> DomainResult<UserAccount> {
        let username = input.username.trim().to_string();
        if username.is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }
        if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
            return Err(DomainError::validation("name fields cannot be empty"));
        }

        let mut records = self.records.write().expect("user store lock poisoned");

        if records.values().any(|u| u.username == username) {
            tracing::warn!(%username, "username already exists");
            return Err(DomainError::conflict(format!(
                "user with username '{username}' already exists"
            )));
        }

        let account = UserAccount {
            id: RecordId::new(),
            username,
            password_hash: input.password_hash,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            role: input.role,
        };
        records.insert(account.id, account.clone());
        tracing::debug!(id = %account.id, "created user");
        Ok(account)
    }

    pub fn list(&self) -> Vec<UserAccount> {
        let records = self.records.read().expect("user store lock poisoned");
        let mut items: Vec<UserAccount> = records.values().cloned().collect();
        items.sort_by_key(|u| u.id);
        items
    }

    pub fn get(&self, id: RecordId) -> Option<UserAccount> {
        self.records
            .read()
            .expect("user store lock poisoned")
            .get(&id)
            .cloned()
    }

    /// Lookup for the login flow.
    pub fn find_by_username(&self, username: &str) -> Option<UserAccount> {
        self.records
            .read()
            .expect("user store lock poisoned")
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    pub fn update(&self, id: RecordId, input: UpdateUserAccount) -> DomainResult<UserAccount> {
        let mut records = self.records.write().expect("user store lock poisoned");

        if !records.contains_key(&id) {
            tracing::warn!(%id, "user not found for update");
            return Err(DomainError::NotFound);
        }

        let username = match input.username {
            Some(username) => {
                let username = username.trim().to_string();
                if username.is_empty() {
                    return Err(DomainError::validation("username cannot be empty"));
                }
                if records.values().any(|u| u.id != id && u.username == username) {
                    tracing::warn!(%username, "username already exists");
                    return Err(DomainError::conflict(format!(
                        "user with username '{username}' already exists"
                    )));
                }
                Some(username)
            }
            None => None,
        };

        if let Some(account) = records.get_mut(&id) {
            if let Some(username) = username {
                account.username = username;
            }
            if let Some(password_hash) = input.password_hash {
                account.password_hash = password_hash;
            }
            if let Some(first_name) = input.first_name {
                account.first_name = first_name.trim().to_string();
            }
            if let Some(last_name) = input.last_name {
                account.last_name = last_name.trim().to_string();
            }
            if let Some(role) = input.role {
                account.role = role;
            }
        }

        records.get(&id).cloned().ok_or(DomainError::NotFound)
    }

    pub fn remove(&self, id: RecordId) -> Option<UserAccount> {
        let removed = self
            .records
            .write()
            .expect("user store lock poisoned")
            .remove(&id);
        if removed.is_some() {
            tracing::debug!(%id, "removed user");
        }
        removed
    }
}
