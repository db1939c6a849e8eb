//! `serieshub-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod ability;
pub mod claims;
pub mod password;
pub mod policy;
pub mod principal;
pub mod roles;
pub mod token;

pub use ability::{Ability, AbilityBuilder, Action, Grant, Subject, ability_for};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use password::{PasswordError, hash_password, verify_password};
pub use policy::{PolicyCheck, PolicyDeclaration};
pub use principal::{Principal, PrincipalId};
pub use roles::{Role, UnknownRole};
pub use token::{Hs256JwtValidator, JwtValidator, TokenError};
