use crate::{
    AppState,
    auth::Identity,
    error::ApiError,
    models::{
        MenuItem, MenuItemRequest, MenuItemStatusRequest, MessageResponse, Restaurant,
        RestaurantRequest, RestaurantStatusRequest,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

/// validated
///
/// Runs the request-boundary validation (non-blank fields, 10-digit phone,
/// non-negative price) before any service logic executes. The services
/// themselves never re-validate these.
fn validated<T: Validate>(payload: T) -> Result<T, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    Ok(payload)
}

// --- Restaurant Handlers ---

/// create_restaurant
///
/// [Authenticated Route] Registers a new restaurant owned by the caller.
/// The `owner_id` is taken from the authenticated identity, never from the
/// payload.
#[utoipa::path(
    post,
    path = "/api/restaurants",
    request_body = RestaurantRequest,
    responses(
        (status = 201, description = "Created", body = Restaurant),
        (status = 400, description = "Validation Failed")
    )
)]
pub async fn create_restaurant(
    identity: Identity,
    State(state): State<AppState>,
    Json(payload): Json<RestaurantRequest>,
) -> Result<(StatusCode, Json<Restaurant>), ApiError> {
    let payload = validated(payload)?;
    let restaurant = state.restaurants.create(&identity, payload).await?;
    Ok((StatusCode::CREATED, Json(restaurant)))
}

/// update_restaurant
///
/// [Authenticated Route] Overwrites a restaurant's descriptive fields.
///
/// *Authorization*: owner-or-admin, enforced in the service against the
/// loaded restaurant's `owner_id`.
#[utoipa::path(
    put,
    path = "/api/restaurants/{id}",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    request_body = RestaurantRequest,
    responses(
        (status = 200, description = "Updated", body = Restaurant),
        (status = 403, description = "Not Owner"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_restaurant(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RestaurantRequest>,
) -> Result<Json<Restaurant>, ApiError> {
    let payload = validated(payload)?;
    let restaurant = state.restaurants.update(&identity, id, payload).await?;
    Ok(Json(restaurant))
}

/// delete_restaurant
///
/// [Admin Route] Permanently removes a restaurant.
///
/// *Authorization*: admin-only — the service rejects the restaurant's own
/// owner with 403. This is deliberate; owners cannot delete their listing.
#[utoipa::path(
    delete,
    path = "/api/restaurants/{id}",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Not Admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_restaurant(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.restaurants.delete(&identity, id).await?;
    Ok(Json(MessageResponse {
        message: "Restaurant deleted successfully".to_string(),
    }))
}

/// update_restaurant_status
///
/// [Admin Route] Enables or disables a restaurant (`active` flag).
///
/// *Authorization*: admin-only, same policy as deletion.
#[utoipa::path(
    patch,
    path = "/api/restaurants/{id}/status",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    request_body = RestaurantStatusRequest,
    responses(
        (status = 200, description = "Updated", body = Restaurant),
        (status = 403, description = "Not Admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_restaurant_status(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RestaurantStatusRequest>,
) -> Result<Json<Restaurant>, ApiError> {
    let restaurant = state
        .restaurants
        .set_active(&identity, id, payload.active)
        .await?;
    Ok(Json(restaurant))
}

/// get_restaurant
///
/// [Public Route] Retrieves a single restaurant by ID.
#[utoipa::path(
    get,
    path = "/api/restaurants/{id}",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Found", body = Restaurant),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Restaurant>, ApiError> {
    let restaurant = state.restaurants.get_by_id(id).await?;
    Ok(Json(restaurant))
}

/// get_restaurants
///
/// [Public Route] Lists every restaurant, active or not.
#[utoipa::path(
    get,
    path = "/api/restaurants",
    responses((status = 200, description = "All restaurants", body = [Restaurant]))
)]
pub async fn get_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    let restaurants = state.restaurants.list_all().await?;
    Ok(Json(restaurants))
}

/// get_active_restaurants
///
/// [Public Route] Lists only the restaurants currently marked active.
#[utoipa::path(
    get,
    path = "/api/restaurants/active",
    responses((status = 200, description = "Active restaurants", body = [Restaurant]))
)]
pub async fn get_active_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    let restaurants = state.restaurants.list_active().await?;
    Ok(Json(restaurants))
}

/// get_restaurants_by_owner
///
/// [Public Route] Lists all restaurants registered by one owner.
#[utoipa::path(
    get,
    path = "/api/restaurants/owner/{owner_id}",
    params(("owner_id" = Uuid, Path, description = "Owner user ID")),
    responses((status = 200, description = "Owner's restaurants", body = [Restaurant]))
)]
pub async fn get_restaurants_by_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    let restaurants = state.restaurants.list_by_owner(owner_id).await?;
    Ok(Json(restaurants))
}

// --- Menu Item Handlers ---

/// add_menu_item
///
/// [Authenticated Route] Adds a menu item to a restaurant.
///
/// *Authorization*: resolved against the parent restaurant's `owner_id`
/// (owner-or-admin). The parent must exist.
#[utoipa::path(
    post,
    path = "/api/restaurants/{id}/menu",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    request_body = MenuItemRequest,
    responses(
        (status = 201, description = "Created", body = MenuItem),
        (status = 403, description = "Not Owner"),
        (status = 404, description = "Restaurant Not Found")
    )
)]
pub async fn add_menu_item(
    identity: Identity,
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
    Json(payload): Json<MenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItem>), ApiError> {
    let payload = validated(payload)?;
    let item = state.menu_items.add(&identity, restaurant_id, payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// update_menu_item
///
/// [Authenticated Route] Overwrites a menu item's fields (owner-or-admin).
#[utoipa::path(
    put,
    path = "/api/menu/{menu_id}",
    params(("menu_id" = Uuid, Path, description = "Menu item ID")),
    request_body = MenuItemRequest,
    responses(
        (status = 200, description = "Updated", body = MenuItem),
        (status = 403, description = "Not Owner"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_menu_item(
    identity: Identity,
    State(state): State<AppState>,
    Path(menu_id): Path<Uuid>,
    Json(payload): Json<MenuItemRequest>,
) -> Result<Json<MenuItem>, ApiError> {
    let payload = validated(payload)?;
    let item = state.menu_items.update(&identity, menu_id, payload).await?;
    Ok(Json(item))
}

/// delete_menu_item
///
/// [Authenticated Route] Removes a menu item. Owner-or-admin — unlike
/// restaurant deletion, this is permitted to the owner.
#[utoipa::path(
    delete,
    path = "/api/menu/{menu_id}",
    params(("menu_id" = Uuid, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Not Owner"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_menu_item(
    identity: Identity,
    State(state): State<AppState>,
    Path(menu_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.menu_items.delete(&identity, menu_id).await?;
    Ok(Json(MessageResponse {
        message: "Menu item deleted successfully".to_string(),
    }))
}

/// update_menu_item_status
///
/// [Authenticated Route] Toggles a menu item's availability (owner-or-admin).
/// Idempotent: repeating the same flag value succeeds.
#[utoipa::path(
    patch,
    path = "/api/menu/{menu_id}/status",
    params(("menu_id" = Uuid, Path, description = "Menu item ID")),
    request_body = MenuItemStatusRequest,
    responses(
        (status = 200, description = "Updated", body = MenuItem),
        (status = 403, description = "Not Owner"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_menu_item_status(
    identity: Identity,
    State(state): State<AppState>,
    Path(menu_id): Path<Uuid>,
    Json(payload): Json<MenuItemStatusRequest>,
) -> Result<Json<MenuItem>, ApiError> {
    let item = state
        .menu_items
        .set_availability(&identity, menu_id, payload.available)
        .await?;
    Ok(Json(item))
}

/// get_menu_item
///
/// [Public Route] Retrieves a single menu item by ID.
#[utoipa::path(
    get,
    path = "/api/menu/{menu_id}",
    params(("menu_id" = Uuid, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "Found", body = MenuItem),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(menu_id): Path<Uuid>,
) -> Result<Json<MenuItem>, ApiError> {
    let item = state.menu_items.get_by_id(menu_id).await?;
    Ok(Json(item))
}

/// get_menu_by_restaurant
///
/// [Public Route] Lists a restaurant's full menu. The restaurant must
/// exist: a missing restaurant id yields 404, not an empty list.
#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/menu",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Menu items", body = [MenuItem]),
        (status = 404, description = "Restaurant Not Found")
    )
)]
pub async fn get_menu_by_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    let items = state.menu_items.list_by_restaurant(restaurant_id).await?;
    Ok(Json(items))
}

/// get_available_menu_by_restaurant
///
/// [Public Route] Lists only the currently available items of a
/// restaurant's menu. Same existence rule as the full listing.
#[utoipa::path(
    get,
    path = "/api/restaurants/{id}/menu/available",
    params(("id" = Uuid, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Available menu items", body = [MenuItem]),
        (status = 404, description = "Restaurant Not Found")
    )
)]
pub async fn get_available_menu_by_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    let items = state
        .menu_items
        .list_available_by_restaurant(restaurant_id)
        .await?;
    Ok(Json(items))
}
