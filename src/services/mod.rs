/// Service Module Index
///
/// The authorization and mutation core. Each service owns the full
/// load-check-write sequence for its resource: load the target entity (and,
/// for menu items, its parent restaurant) from the store, evaluate the
/// authorization predicate against the caller's identity, and only then
/// perform the mutation. Identity is always an explicit parameter — nothing
/// in this layer reads ambient request state.
pub mod menu;
pub mod restaurant;

pub use menu::MenuItemService;
pub use restaurant::RestaurantService;

use std::sync::Arc;

/// Service State Aliases
///
/// The concrete types used to share the service layer across the
/// application state.
pub type RestaurantServiceState = Arc<RestaurantService>;
pub type MenuItemServiceState = Arc<MenuItemService>;
