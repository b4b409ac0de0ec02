use async_trait::async_trait;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use restaurant_portal::{
    AppState, MenuItemService, RestaurantService,
    auth::{Identity, Role},
    config::AppConfig,
    handlers,
    models::{
        MenuItem, MenuItemRequest, MenuItemStatusRequest, MessageResponse, Restaurant,
        RestaurantRequest, RestaurantStatusRequest,
    },
    repository::{MenuItemRepository, RestaurantRepository},
};
use rust_decimal::Decimal;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use uuid::Uuid;

// --- In-Memory Stores ---

// Handlers are tested against the real services wired to stateful in-memory
// stores, so a create can be observed by the reads that follow it.
#[derive(Default)]
struct InMemoryRestaurants {
    rows: Mutex<HashMap<Uuid, Restaurant>>,
}

#[async_trait]
impl RestaurantRepository for InMemoryRestaurants {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, restaurant: &Restaurant) -> Result<Restaurant, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let stored = match rows.get(&restaurant.id) {
            Some(existing) => Restaurant {
                owner_id: existing.owner_id,
                created_at: existing.created_at,
                updated_at: Utc::now(),
                ..restaurant.clone()
            },
            None => restaurant.clone(),
        };
        rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn find_all(&self) -> Result<Vec<Restaurant>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn find_active(&self) -> Result<Vec<Restaurant>, sqlx::Error> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.active)
            .cloned()
            .collect())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Restaurant>, sqlx::Error> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct InMemoryMenuItems {
    rows: Mutex<HashMap<Uuid, MenuItem>>,
}

#[async_trait]
impl MenuItemRepository for InMemoryMenuItems {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MenuItem>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, item: &MenuItem) -> Result<MenuItem, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let stored = match rows.get(&item.id) {
            Some(existing) => MenuItem {
                restaurant_id: existing.restaurant_id,
                created_at: existing.created_at,
                updated_at: Utc::now(),
                ..item.clone()
            },
            None => item.clone(),
        };
        rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn find_by_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn find_available_by_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.restaurant_id == restaurant_id && m.available)
            .cloned()
            .collect())
    }
}

// --- Test Utilities ---

const TEST_OWNER_ID: Uuid = Uuid::from_u128(123);
const TEST_ADMIN_ID: Uuid = Uuid::from_u128(456);

// Creates an AppState with real services over in-memory stores.
fn create_test_state() -> AppState {
    let restaurant_store = Arc::new(InMemoryRestaurants::default());
    let menu_store = Arc::new(InMemoryMenuItems::default());
    AppState {
        restaurants: Arc::new(RestaurantService::new(restaurant_store.clone())),
        menu_items: Arc::new(MenuItemService::new(menu_store, restaurant_store)),
        config: AppConfig::default(),
    }
}

fn owner_user() -> Identity {
    Identity {
        user_id: TEST_OWNER_ID,
        role: Role::Owner,
    }
}

fn other_owner() -> Identity {
    Identity {
        user_id: Uuid::from_u128(124),
        role: Role::Owner,
    }
}

fn admin_user() -> Identity {
    Identity {
        user_id: TEST_ADMIN_ID,
        role: Role::Admin,
    }
}

fn restaurant_payload() -> RestaurantRequest {
    RestaurantRequest {
        name: "Luigi's".to_string(),
        description: Some("Wood-fired pizza".to_string()),
        address: "1 Main Street".to_string(),
        phone: "0871234567".to_string(),
    }
}

fn menu_payload() -> MenuItemRequest {
    MenuItemRequest {
        name: "Margherita".to_string(),
        description: None,
        price: Decimal::new(999, 2),
        category: Some("Pizza".to_string()),
    }
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// Seeds a restaurant owned by TEST_OWNER_ID through the create handler.
async fn seed_restaurant(state: &AppState) -> Restaurant {
    let result = handlers::create_restaurant(
        owner_user(),
        State(state.clone()),
        Json(restaurant_payload()),
    )
    .await;
    let response = result.into_response();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// --- Restaurant Handler Tests ---

#[tokio::test]
async fn test_create_restaurant_created_with_caller_as_owner() {
    let state = create_test_state();

    let restaurant = seed_restaurant(&state).await;

    assert_eq!(restaurant.owner_id, TEST_OWNER_ID);
    assert!(restaurant.active);
}

#[tokio::test]
async fn test_create_restaurant_invalid_phone_rejected() {
    let state = create_test_state();
    let payload = RestaurantRequest {
        phone: "12345".to_string(),
        ..restaurant_payload()
    };

    let result =
        handlers::create_restaurant(owner_user(), State(state), Json(payload)).await;

    let response = result.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_restaurant_blank_name_rejected() {
    let state = create_test_state();
    let payload = RestaurantRequest {
        name: "".to_string(),
        ..restaurant_payload()
    };

    let result =
        handlers::create_restaurant(owner_user(), State(state), Json(payload)).await;

    let response = result.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_restaurant_not_found() {
    let state = create_test_state();

    let result = handlers::get_restaurant(State(state), Path(Uuid::new_v4())).await;

    let response = result.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_restaurant_by_other_owner_forbidden() {
    let state = create_test_state();
    let restaurant = seed_restaurant(&state).await;

    let result = handlers::update_restaurant(
        other_owner(),
        State(state),
        Path(restaurant.id),
        Json(restaurant_payload()),
    )
    .await;

    let response = result.into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_restaurant_owner_forbidden_admin_allowed() {
    let state = create_test_state();
    let restaurant = seed_restaurant(&state).await;

    // The owner is rejected: deletion is a governance action.
    let result =
        handlers::delete_restaurant(owner_user(), State(state.clone()), Path(restaurant.id))
            .await;
    assert_eq!(result.into_response().status(), StatusCode::FORBIDDEN);

    // The admin succeeds and gets the confirmation envelope.
    let result =
        handlers::delete_restaurant(admin_user(), State(state.clone()), Path(restaurant.id))
            .await;
    let response = result.into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let message: MessageResponse = body_json(response).await;
    assert_eq!(message.message, "Restaurant deleted successfully");

    // Gone afterwards.
    let result = handlers::get_restaurant(State(state), Path(restaurant.id)).await;
    assert_eq!(result.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_restaurant_status_admin_only() {
    let state = create_test_state();
    let restaurant = seed_restaurant(&state).await;

    let result = handlers::update_restaurant_status(
        owner_user(),
        State(state.clone()),
        Path(restaurant.id),
        Json(RestaurantStatusRequest { active: false }),
    )
    .await;
    assert_eq!(result.into_response().status(), StatusCode::FORBIDDEN);

    let result = handlers::update_restaurant_status(
        admin_user(),
        State(state),
        Path(restaurant.id),
        Json(RestaurantStatusRequest { active: false }),
    )
    .await;
    let response = result.into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Restaurant = body_json(response).await;
    assert!(!updated.active);
}

// --- Menu Item Handler Tests ---

#[tokio::test]
async fn test_menu_item_flow_through_handlers() {
    let state = create_test_state();
    let restaurant = seed_restaurant(&state).await;

    // Add -> 201
    let result = handlers::add_menu_item(
        owner_user(),
        State(state.clone()),
        Path(restaurant.id),
        Json(menu_payload()),
    )
    .await;
    let response = result.into_response();
    assert_eq!(response.status(), StatusCode::CREATED);
    let item: MenuItem = body_json(response).await;
    assert!(item.available);

    // Toggle availability off -> 200
    let result = handlers::update_menu_item_status(
        owner_user(),
        State(state.clone()),
        Path(item.id),
        Json(MenuItemStatusRequest { available: false }),
    )
    .await;
    let response = result.into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let toggled: MenuItem = body_json(response).await;
    assert!(!toggled.available);

    // Owner delete -> 200 (permitted, unlike restaurant deletion)
    let result =
        handlers::delete_menu_item(owner_user(), State(state.clone()), Path(item.id)).await;
    assert_eq!(result.into_response().status(), StatusCode::OK);

    // Read after delete -> 404
    let result = handlers::get_menu_item(State(state), Path(item.id)).await;
    assert_eq!(result.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_menu_item_negative_price_rejected() {
    let state = create_test_state();
    let restaurant = seed_restaurant(&state).await;

    let payload = MenuItemRequest {
        price: Decimal::new(-100, 2),
        ..menu_payload()
    };

    let result = handlers::add_menu_item(
        owner_user(),
        State(state),
        Path(restaurant.id),
        Json(payload),
    )
    .await;

    assert_eq!(result.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_menu_by_restaurant_missing_restaurant_404() {
    let state = create_test_state();

    let result = handlers::get_menu_by_restaurant(State(state), Path(Uuid::new_v4())).await;

    // NotFound, not an empty 200 list.
    assert_eq!(result.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_menu_by_restaurant_empty_menu_is_200() {
    let state = create_test_state();
    let restaurant = seed_restaurant(&state).await;

    let result = handlers::get_menu_by_restaurant(State(state), Path(restaurant.id)).await;

    let response = result.into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let items: Vec<MenuItem> = body_json(response).await;
    assert!(items.is_empty());
}
