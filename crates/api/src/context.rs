use serieshub_auth::{PrincipalId, Role};

/// Principal context for a request (authenticated identity + role).
///
/// Attached to the request by the authentication gate; trusted as-is by
/// everything downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal_id: PrincipalId,
    username: String,
    role: Role,
}

impl PrincipalContext {
    pub fn new(principal_id: PrincipalId, username: String, role: Role) -> Self {
        Self {
            principal_id,
            username,
            role,
        }
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.principal_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
