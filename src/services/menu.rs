use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::Identity,
    error::ApiError,
    models::{MenuItem, MenuItemRequest, Restaurant},
    repository::{MenuItemStore, RestaurantStore},
};

/// MenuItemService
///
/// Enforces the menu item policy. A menu item has no owner of its own:
/// every mutation loads the parent restaurant and authorizes against that
/// restaurant's `owner_id`.
///
/// | operation        | allowed caller |
/// |------------------|----------------|
/// | add              | owner or admin |
/// | update           | owner or admin |
/// | delete           | owner or admin |
/// | set_availability | owner or admin |
/// | reads            | public         |
///
/// Note the contrast with RestaurantService: menu item deletion and
/// availability toggles ARE permitted to the owner, while restaurant
/// deletion and status changes are admin-only.
pub struct MenuItemService {
    menu_items: MenuItemStore,
    restaurants: RestaurantStore,
}

impl MenuItemService {
    pub fn new(menu_items: MenuItemStore, restaurants: RestaurantStore) -> Self {
        Self {
            menu_items,
            restaurants,
        }
    }

    /// load_parent
    ///
    /// Resolves a menu item's parent restaurant. A dangling `restaurant_id`
    /// is a data-integrity fault but is signaled as the same NotFound kind
    /// the caller would see for a missing restaurant.
    async fn load_parent(&self, item: &MenuItem) -> Result<Restaurant, ApiError> {
        self.restaurants
            .find_by_id(item.restaurant_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Restaurant not found".to_string()))
    }

    /// add
    ///
    /// Creates a menu item under the given restaurant. The parent must exist
    /// and the caller must be its owner (or an admin). `available` always
    /// starts true.
    pub async fn add(
        &self,
        identity: &Identity,
        restaurant_id: Uuid,
        req: MenuItemRequest,
    ) -> Result<MenuItem, ApiError> {
        let restaurant = self
            .restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Restaurant", restaurant_id))?;

        if !identity.can_manage(restaurant.owner_id) {
            return Err(ApiError::forbidden(
                "You are not authorized to add menu items to this restaurant",
            ));
        }

        let item = MenuItem {
            id: Uuid::new_v4(),
            restaurant_id,
            name: req.name,
            description: req.description,
            price: req.price,
            category: req.category,
            available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let saved = self.menu_items.save(&item).await?;
        tracing::info!(menu_id = %saved.id, restaurant_id = %restaurant_id, "menu item added");
        Ok(saved)
    }

    /// update
    ///
    /// Overwrites name/description/price/category. `restaurant_id` and
    /// `available` are untouched by this path.
    pub async fn update(
        &self,
        identity: &Identity,
        menu_id: Uuid,
        req: MenuItemRequest,
    ) -> Result<MenuItem, ApiError> {
        let mut item = self
            .menu_items
            .find_by_id(menu_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Menu item", menu_id))?;

        let restaurant = self.load_parent(&item).await?;

        if !identity.can_manage(restaurant.owner_id) {
            return Err(ApiError::forbidden(
                "You are not authorized to update this menu item",
            ));
        }

        item.name = req.name;
        item.description = req.description;
        item.price = req.price;
        item.category = req.category;

        Ok(self.menu_items.save(&item).await?)
    }

    /// delete
    ///
    /// Owner-or-admin — unlike restaurant deletion, the owner IS permitted
    /// to remove their own menu items.
    pub async fn delete(&self, identity: &Identity, menu_id: Uuid) -> Result<(), ApiError> {
        let item = self
            .menu_items
            .find_by_id(menu_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Menu item", menu_id))?;

        let restaurant = self.load_parent(&item).await?;

        if !identity.can_manage(restaurant.owner_id) {
            return Err(ApiError::forbidden(
                "You are not authorized to delete this menu item",
            ));
        }

        if !self.menu_items.delete(item.id).await? {
            return Err(ApiError::not_found("Menu item", menu_id));
        }

        tracing::info!(menu_id = %menu_id, "menu item deleted");
        Ok(())
    }

    /// set_availability
    ///
    /// Owner-or-admin (not admin-only, in contrast to restaurant status).
    /// Idempotent: setting an already-set flag persists and succeeds.
    pub async fn set_availability(
        &self,
        identity: &Identity,
        menu_id: Uuid,
        available: bool,
    ) -> Result<MenuItem, ApiError> {
        let mut item = self
            .menu_items
            .find_by_id(menu_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Menu item", menu_id))?;

        let restaurant = self.load_parent(&item).await?;

        if !identity.can_manage(restaurant.owner_id) {
            return Err(ApiError::forbidden(
                "You are not authorized to change this menu item status",
            ));
        }

        item.available = available;
        Ok(self.menu_items.save(&item).await?)
    }

    /// get_by_id
    ///
    /// Public read; no authorization check.
    pub async fn get_by_id(&self, menu_id: Uuid) -> Result<MenuItem, ApiError> {
        self.menu_items
            .find_by_id(menu_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Menu item", menu_id))
    }

    /// list_by_restaurant
    ///
    /// Verifies the restaurant exists first: a missing restaurant yields
    /// NotFound, not an empty list.
    pub async fn list_by_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<MenuItem>, ApiError> {
        self.restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Restaurant", restaurant_id))?;

        Ok(self.menu_items.find_by_restaurant(restaurant_id).await?)
    }

    /// list_available_by_restaurant
    ///
    /// Same existence rule, filtered to `available = true`.
    pub async fn list_available_by_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<MenuItem>, ApiError> {
        self.restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Restaurant", restaurant_id))?;

        Ok(self
            .menu_items
            .find_available_by_restaurant(restaurant_id)
            .await?)
    }
}
