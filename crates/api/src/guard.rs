//! Policy enforcement: evaluates an endpoint's declared checks before the
//! handler runs.

use axum::{Router, extract::State, middleware::Next, response::Response};

use serieshub_auth::{PolicyCheck, PolicyDeclaration, ability_for};

use crate::app::errors;
use crate::context::PrincipalContext;

/// Attach a policy declaration to every route registered in `router`.
///
/// Routes never wrapped by this function carry no declaration and are open
/// to any authenticated principal.
pub fn with_policy(router: Router, checks: impl Into<Vec<PolicyCheck>>) -> Router {
    let declaration = PolicyDeclaration::new(checks.into());
    router.route_layer(axum::middleware::from_fn_with_state(
        declaration,
        policy_guard,
    ))
}

/// Evaluate the endpoint's policy declaration against the principal's
/// ability, freshly built from the role the authentication gate resolved.
///
/// Denials are uniform: the response never reveals which check failed.
pub async fn policy_guard(
    State(declaration): State<PolicyDeclaration>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(principal) = req.extensions().get::<PrincipalContext>() else {
        // No principal here means the authentication gate was never crossed;
        // fail closed.
        tracing::warn!("policy guard reached without a principal context");
        return errors::access_denied();
    };

    let ability = ability_for(principal.role());
    if !declaration.evaluate(&ability) {
        tracing::debug!(
            principal = %principal.principal_id(),
            role = %principal.role(),
            "request denied by policy"
        );
        return errors::access_denied();
    }

    next.run(req).await
}
