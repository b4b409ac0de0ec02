/// Router Module Index
///
/// Organizes the application's routing logic into security-segregated modules.
/// Access control is applied explicitly at the module level (via Axum layers),
/// preventing accidental exposure of protected endpoints.

/// Routes accessible to all users (anonymous, read-only).
/// Every read in this application is public; no visibility filtering applies.
pub mod public;

/// Routes protected by the `Identity` extractor middleware.
/// Requires a validated caller identity; ownership checks happen in the services.
pub mod authenticated;

/// Routes whose operations require the Admin capability.
/// Authentication is enforced by middleware; the capability check itself
/// lives in the service layer so it is covered by the same tests as the rest
/// of the policy table.
pub mod admin;
