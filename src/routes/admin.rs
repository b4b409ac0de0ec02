use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, patch},
};

/// Admin Router Module
///
/// Defines the routes whose operations require the Admin capability:
/// restaurant deletion and activation control. These stay on the resource
/// paths (rather than an /admin prefix) to keep the REST surface uniform.
///
/// Access Control:
/// The routes are wrapped in the same authentication middleware as the
/// authenticated module; the Admin capability check is performed inside the
/// service, which rejects even the restaurant's own owner with 403. Keeping
/// the check in the service means the policy is exercised by the service
/// tests, not just by routing configuration.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // DELETE /api/restaurants/{id}
        // Permanently removes a restaurant and is deliberately withheld from
        // owners — deletion is a platform governance action.
        .route("/api/restaurants/{id}", delete(handlers::delete_restaurant))
        // PATCH /api/restaurants/{id}/status
        // Enables or disables a restaurant. Owners cannot self-deactivate;
        // the active flag is governed by administrators only.
        .route(
            "/api/restaurants/{id}/status",
            patch(handlers::update_restaurant_status),
        )
}
