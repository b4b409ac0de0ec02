use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, patch, post, put},
};

/// Authenticated Router Module
///
/// Defines the routes accessible to any caller who has passed the
/// authentication layer. This module carries the owner-scoped mutations:
/// restaurant registration and updates, plus the full menu item lifecycle.
///
/// Access Control Strategy:
/// Every handler in this module relies on the `Identity` extractor middleware
/// being present on the router layer above. The services then evaluate the
/// ownership predicate (owner-or-admin) against the loaded resource — no
/// route in this module is admin-only.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // POST /api/restaurants
        // Registers a new restaurant owned by the caller. Any authenticated
        // user may create restaurants they own.
        .route("/api/restaurants", post(handlers::create_restaurant))
        // PUT /api/restaurants/{id}
        // Overwrites a restaurant's descriptive fields. Owner-or-admin;
        // the owner and active fields are never writable here.
        .route("/api/restaurants/{id}", put(handlers::update_restaurant))
        // POST /api/restaurants/{id}/menu
        // Adds a menu item under a restaurant the caller owns (or any, for admins).
        .route(
            "/api/restaurants/{id}/menu",
            post(handlers::add_menu_item),
        )
        // PUT /api/menu/{menu_id}
        // Overwrites a menu item's fields. Authorization is resolved through
        // the parent restaurant's owner.
        .route("/api/menu/{menu_id}", put(handlers::update_menu_item))
        // DELETE /api/menu/{menu_id}
        // Removes a menu item. Owners may delete their own items — this is
        // intentionally more permissive than restaurant deletion.
        .route("/api/menu/{menu_id}", delete(handlers::delete_menu_item))
        // PATCH /api/menu/{menu_id}/status
        // Toggles a menu item's availability flag. Owner-or-admin.
        .route(
            "/api/menu/{menu_id}/status",
            patch(handlers::update_menu_item_status),
        )
}
