use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Core Application Schemas (Mapped to Database) ---

/// Restaurant
///
/// Represents a restaurant record from the `public.restaurants` table.
/// This is the primary aggregate for the ownership model: every restaurant
/// carries the `owner_id` of the user who registered it, and all menu item
/// authorization is resolved through that field.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Restaurant {
    pub id: Uuid,
    // FK to the authenticated user who created the restaurant.
    // Set once at creation; update operations never touch it.
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    // Exactly 10 digits, enforced at the request boundary.
    pub phone: String,

    // Lifecycle flag, toggled by administrators only. Independent of deletion.
    pub active: bool,

    // Timestamp handling for database integration and JSON serialization.
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// MenuItem
///
/// Represents a single dish record from the `public.menu_items` table.
/// A menu item belongs to exactly one restaurant (`restaurant_id`, immutable);
/// it does not carry an owner of its own — authorization is derived from the
/// parent restaurant's `owner_id`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct MenuItem {
    pub id: Uuid,
    // FK to public.restaurants.id. Immutable after creation.
    pub restaurant_id: Uuid,
    pub name: String,
    pub description: Option<String>,

    // Non-negative monetary amount.
    #[ts(type = "string")]
    pub price: Decimal,

    pub category: Option<String>,

    // Availability flag, toggleable by the restaurant owner or an admin.
    pub available: bool,

    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

// --- Request Payloads (Input Schemas) ---

/// RestaurantRequest
///
/// Input payload for registering a restaurant (POST /api/restaurants) and for
/// updating one (PUT /api/restaurants/{id}). Updates overwrite the four text
/// fields wholesale; `owner_id` and `active` are never part of this payload.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[ts(export)]
pub struct RestaurantRequest {
    #[validate(length(min = 1, message = "Restaurant name is required"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "0871234567")]
    pub phone: String,
}

/// MenuItemRequest
///
/// Input payload for adding a menu item (POST /api/restaurants/{id}/menu) and
/// updating one (PUT /api/menu/{id}). The parent restaurant id comes from the
/// path, never from the body, so an item cannot be moved between restaurants.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[ts(export)]
pub struct MenuItemRequest {
    #[validate(length(min = 1, message = "Menu item name is required"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    #[ts(type = "string")]
    #[schema(example = "9.99")]
    pub price: Decimal,

    pub category: Option<String>,
}

/// RestaurantStatusRequest
///
/// Body of PATCH /api/restaurants/{id}/status. Admin-only operation.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RestaurantStatusRequest {
    pub active: bool,
}

/// MenuItemStatusRequest
///
/// Body of PATCH /api/menu/{id}/status. Owner-or-admin operation.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct MenuItemStatusRequest {
    pub available: bool,
}

// --- Output Schemas ---

/// MessageResponse
///
/// Confirmation envelope returned by the delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

// --- Field Validators ---

/// validate_phone
///
/// Mirrors the persisted constraint: exactly 10 ASCII digits, nothing else.
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("Phone number must be 10 digits".into()))
    }
}

/// validate_price
///
/// Rejects negative amounts. Zero is allowed (e.g. complimentary items).
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        Err(ValidationError::new("price").with_message("Price must not be negative".into()))
    } else {
        Ok(())
    }
}
