use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::{Capability, Identity},
    error::ApiError,
    models::{Restaurant, RestaurantRequest},
    repository::RestaurantStore,
};

/// RestaurantService
///
/// Enforces the restaurant lifecycle policy:
///
/// | operation    | allowed caller       |
/// |--------------|----------------------|
/// | create       | any authenticated    |
/// | update       | owner or admin       |
/// | delete       | admin only           |
/// | set_active   | admin only           |
/// | reads        | public               |
///
/// Delete and status change are deliberately narrower than update: owners
/// cannot remove or deactivate their own restaurant. The two checks are kept
/// as written — do not fold them into the shared ownership predicate.
pub struct RestaurantService {
    restaurants: RestaurantStore,
}

impl RestaurantService {
    pub fn new(restaurants: RestaurantStore) -> Self {
        Self { restaurants }
    }

    /// create
    ///
    /// Registers a new restaurant owned by the caller. No authorization
    /// check beyond authentication itself — any authenticated user may
    /// create restaurants they own. `active` always starts true.
    pub async fn create(
        &self,
        identity: &Identity,
        req: RestaurantRequest,
    ) -> Result<Restaurant, ApiError> {
        let restaurant = Restaurant {
            id: Uuid::new_v4(),
            owner_id: identity.user_id,
            name: req.name,
            description: req.description,
            address: req.address,
            phone: req.phone,
            active: true,
            // Stamped here for completeness; the store sets the canonical
            // values on insert.
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let saved = self.restaurants.save(&restaurant).await?;
        tracing::info!(restaurant_id = %saved.id, owner_id = %saved.owner_id, "restaurant created");
        Ok(saved)
    }

    /// update
    ///
    /// Overwrites the descriptive fields. `owner_id` and `active` are never
    /// touched by this path, whatever the caller's role.
    pub async fn update(
        &self,
        identity: &Identity,
        id: Uuid,
        req: RestaurantRequest,
    ) -> Result<Restaurant, ApiError> {
        let mut restaurant = self
            .restaurants
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Restaurant", id))?;

        if !identity.can_manage(restaurant.owner_id) {
            return Err(ApiError::forbidden(
                "You are not authorized to update this restaurant",
            ));
        }

        restaurant.name = req.name;
        restaurant.description = req.description;
        restaurant.address = req.address;
        restaurant.phone = req.phone;

        Ok(self.restaurants.save(&restaurant).await?)
    }

    /// delete
    ///
    /// Admin-only. Owners may NOT delete their own restaurant.
    pub async fn delete(&self, identity: &Identity, id: Uuid) -> Result<(), ApiError> {
        let restaurant = self
            .restaurants
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Restaurant", id))?;

        if !identity.has_capability(Capability::Admin) {
            return Err(ApiError::forbidden(
                "Only administrators can delete restaurants",
            ));
        }

        // A concurrent delete may have won the race since the load above.
        if !self.restaurants.delete(restaurant.id).await? {
            return Err(ApiError::not_found("Restaurant", id));
        }

        tracing::info!(restaurant_id = %id, admin_id = %identity.user_id, "restaurant deleted");
        Ok(())
    }

    /// set_active
    ///
    /// Admin-only, same as delete: owners cannot self-deactivate.
    pub async fn set_active(
        &self,
        identity: &Identity,
        id: Uuid,
        active: bool,
    ) -> Result<Restaurant, ApiError> {
        let mut restaurant = self
            .restaurants
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Restaurant", id))?;

        if !identity.has_capability(Capability::Admin) {
            return Err(ApiError::forbidden(
                "Only administrators can change restaurant status",
            ));
        }

        restaurant.active = active;
        let saved = self.restaurants.save(&restaurant).await?;
        tracing::info!(restaurant_id = %id, active, "restaurant status changed");
        Ok(saved)
    }

    /// get_by_id
    ///
    /// Public read; no authorization check.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Restaurant, ApiError> {
        self.restaurants
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Restaurant", id))
    }

    /// list_all
    ///
    /// Every restaurant, active or not. Public.
    pub async fn list_all(&self) -> Result<Vec<Restaurant>, ApiError> {
        Ok(self.restaurants.find_all().await?)
    }

    /// list_active
    ///
    /// Only restaurants currently accepting customers. Public.
    pub async fn list_active(&self) -> Result<Vec<Restaurant>, ApiError> {
        Ok(self.restaurants.find_active().await?)
    }

    /// list_by_owner
    ///
    /// All restaurants for one owner. Public, even for other users' listings.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Restaurant>, ApiError> {
        Ok(self.restaurants.find_by_owner(owner_id).await?)
    }
}
