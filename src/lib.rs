use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod services;

// Module for routing segregation (Public, Authenticated, Admin).
pub mod routes;
use auth::Identity; // The resolved authenticated caller identity.
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry point (main.rs).
pub use config::AppConfig;
pub use error::ApiError;
pub use repository::{MenuItemStore, PostgresRepository, RestaurantStore};
pub use services::{
    MenuItemService, MenuItemServiceState, RestaurantService, RestaurantServiceState,
};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the
/// application, aggregating all paths and schemas decorated with the
/// `#[utoipa::path]` and `#[derive(utoipa::ToSchema)]` macros.
/// The resulting JSON is served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::create_restaurant, handlers::update_restaurant, handlers::delete_restaurant,
        handlers::update_restaurant_status, handlers::get_restaurant, handlers::get_restaurants,
        handlers::get_active_restaurants, handlers::get_restaurants_by_owner,
        handlers::add_menu_item, handlers::update_menu_item, handlers::delete_menu_item,
        handlers::update_menu_item_status, handlers::get_menu_item,
        handlers::get_menu_by_restaurant, handlers::get_available_menu_by_restaurant,
    ),
    components(
        schemas(
            models::Restaurant, models::MenuItem, models::RestaurantRequest,
            models::MenuItemRequest, models::RestaurantStatusRequest,
            models::MenuItemStatusRequest, models::MessageResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "restaurant-portal", description = "Restaurant & Menu Management API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe, immutable container holding all application
/// services and configuration, shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Restaurant lifecycle service (create/update owner-or-admin,
    /// delete/status admin-only).
    pub restaurants: RestaurantServiceState,
    /// Menu item service; authorization resolved via the parent restaurant.
    pub menu_items: MenuItemServiceState,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These implementations allow extractors to selectively pull components from
// the shared AppState. The Identity extractor only needs AppConfig.

impl FromRef<AppState> for RestaurantServiceState {
    fn from_ref(app_state: &AppState) -> RestaurantServiceState {
        app_state.restaurants.clone()
    }
}

impl FromRef<AppState> for MenuItemServiceState {
    fn from_ref(app_state: &AppState) -> MenuItemServiceState {
        app_state.menu_items.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces authentication for the authenticated and admin route tiers.
///
/// *Mechanism*: attempts to extract `Identity` from the request. Since
/// `Identity` implements `FromRequestParts`, a failed extraction (missing or
/// invalid JWT) rejects the request with 401 before the handler runs. On
/// success the request proceeds; handlers re-extract the identity and pass
/// it explicitly into the services.
async fn auth_middleware(_identity: Identity, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and
/// scoped middleware, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public Routes: no middleware applied.
        .merge(public::public_routes())
        // Authenticated Routes: protected by the `auth_middleware`.
        .merge(
            authenticated::authenticated_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        // Admin-tier Routes: same authentication gate; the Admin capability
        // check is performed inside the services.
        .merge(
            admin::admin_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        // Apply the unified state to all routes.
        .with_state(state);

    // 3. Observability and Correlation Layers (applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: a unique UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: wraps the request/response lifecycle in a
                // tracing span that carries the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: return the x-request-id header to
                // the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Helper used by `TraceLayer` to customize span creation: extracts the
/// `x-request-id` header (if present) and includes it in the structured
/// logging metadata alongside the HTTP method and URI, so every log line
/// for a single request is correlated by a unique ID.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
