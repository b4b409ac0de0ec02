use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any
/// client (anonymous or logged-in). Reads are public by contract in this
/// system — restaurant listings and menus are customer-facing data, so no
/// ownership or role filtering applies anywhere in this module.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(|| async { "ok" }))
        // GET /api/restaurants
        // Lists every registered restaurant, including deactivated ones.
        .route("/api/restaurants", get(handlers::get_restaurants))
        // GET /api/restaurants/active
        // Lists only the restaurants currently marked active.
        .route(
            "/api/restaurants/active",
            get(handlers::get_active_restaurants),
        )
        // GET /api/restaurants/{id}
        // Retrieves the detailed view of a single restaurant.
        .route("/api/restaurants/{id}", get(handlers::get_restaurant))
        // GET /api/restaurants/owner/{owner_id}
        // Lists all restaurants registered by a given owner. Public even for
        // other users' listings.
        .route(
            "/api/restaurants/owner/{owner_id}",
            get(handlers::get_restaurants_by_owner),
        )
        // GET /api/restaurants/{id}/menu
        // Lists a restaurant's full menu. 404 if the restaurant does not exist.
        .route(
            "/api/restaurants/{id}/menu",
            get(handlers::get_menu_by_restaurant),
        )
        // GET /api/restaurants/{id}/menu/available
        // Lists only the items currently marked available.
        .route(
            "/api/restaurants/{id}/menu/available",
            get(handlers::get_available_menu_by_restaurant),
        )
        // GET /api/menu/{menu_id}
        // Retrieves a single menu item.
        .route("/api/menu/{menu_id}", get(handlers::get_menu_item))
}
