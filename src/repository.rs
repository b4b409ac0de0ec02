use crate::models::{MenuItem, Restaurant};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// RestaurantRepository Trait
///
/// Defines the abstract contract for restaurant persistence. This is the core
/// of the Repository Abstraction pattern, allowing the service layer to
/// interact with the data layer without knowing the specific implementation
/// (Postgres, in-memory mock, etc.).
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn RestaurantRepository>`) safely shareable across Axum's
/// asynchronous task boundaries.
///
/// Every method returns `Result<_, sqlx::Error>`: a store failure is a
/// distinct error kind at the API boundary and must not be conflated with
/// "row absent", which is modelled as `Ok(None)`.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>, sqlx::Error>;

    /// Insert-or-update. The update arm refreshes `updated_at` and never
    /// touches `owner_id` or `created_at`, enforcing the ownership
    /// invariant at the store as well as in the service.
    async fn save(&self, restaurant: &Restaurant) -> Result<Restaurant, sqlx::Error>;

    /// Hard delete. Returns true if a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    async fn find_all(&self) -> Result<Vec<Restaurant>, sqlx::Error>;
    async fn find_active(&self) -> Result<Vec<Restaurant>, sqlx::Error>;
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Restaurant>, sqlx::Error>;
}

/// MenuItemRepository Trait
///
/// Persistence contract for menu items. Mirrors the restaurant store; the
/// by-restaurant queries are the only lookup shape the application needs
/// beyond id access.
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MenuItem>, sqlx::Error>;

    /// Insert-or-update. The update arm never touches `restaurant_id` or
    /// `created_at`; a menu item cannot migrate between restaurants.
    async fn save(&self, item: &MenuItem) -> Result<MenuItem, sqlx::Error>;

    /// Hard delete. Returns true if a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    async fn find_by_restaurant(&self, restaurant_id: Uuid)
    -> Result<Vec<MenuItem>, sqlx::Error>;
    async fn find_available_by_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<MenuItem>, sqlx::Error>;
}

/// Store State Aliases
///
/// The concrete types used to share the persistence layer across the
/// application state.
pub type RestaurantStore = Arc<dyn RestaurantRepository>;
pub type MenuItemStore = Arc<dyn MenuItemRepository>;

/// PostgresRepository
///
/// The concrete implementation of both store traits, backed by PostgreSQL.
/// Queries use the runtime-checked sqlx API with positional binds, so the
/// crate compiles without a reachable database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const RESTAURANT_COLUMNS: &str =
    "id, owner_id, name, description, address, phone, active, created_at, updated_at";

const MENU_ITEM_COLUMNS: &str =
    "id, restaurant_id, name, description, price, category, available, created_at, updated_at";

#[async_trait]
impl RestaurantRepository for PostgresRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Restaurant>, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// save
    ///
    /// Upsert keyed on `id`. `created_at`/`updated_at` are owned by the store:
    /// both are stamped on insert, only `updated_at` is refreshed on update.
    /// `owner_id` is deliberately absent from the update arm.
    async fn save(&self, restaurant: &Restaurant) -> Result<Restaurant, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>(&format!(
            r#"
            INSERT INTO restaurants (id, owner_id, name, description, address, phone, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                description = EXCLUDED.description,
                address = EXCLUDED.address,
                phone = EXCLUDED.phone,
                active = EXCLUDED.active,
                updated_at = NOW()
            RETURNING {RESTAURANT_COLUMNS}
            "#
        ))
        .bind(restaurant.id)
        .bind(restaurant.owner_id)
        .bind(&restaurant.name)
        .bind(&restaurant.description)
        .bind(&restaurant.address)
        .bind(&restaurant.phone)
        .bind(restaurant.active)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_all(&self) -> Result<Vec<Restaurant>, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn find_active(&self) -> Result<Vec<Restaurant>, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE active = true ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Restaurant>, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl MenuItemRepository for PostgresRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MenuItem>, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save(&self, item: &MenuItem) -> Result<MenuItem, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(&format!(
            r#"
            INSERT INTO menu_items (id, restaurant_id, name, description, price, category, available, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                category = EXCLUDED.category,
                available = EXCLUDED.available,
                updated_at = NOW()
            RETURNING {MENU_ITEM_COLUMNS}
            "#
        ))
        .bind(item.id)
        .bind(item.restaurant_id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.category)
        .bind(item.available)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE restaurant_id = $1 ORDER BY category, name"
        ))
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn find_available_by_restaurant(
        &self,
        restaurant_id: Uuid,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE restaurant_id = $1 AND available = true ORDER BY category, name"
        ))
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await
    }
}
