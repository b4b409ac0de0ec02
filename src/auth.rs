use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{AppConfig, Env};

/// Role
///
/// The flat role carried in the JWT. 'owner' is the standard role for users
/// who register and run restaurants; 'admin' grants the platform governance
/// operations (restaurant deletion and activation control).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    #[default]
    Owner,
    Admin,
}

/// Capability
///
/// Enumerated capabilities granted by roles. Authorization call sites check
/// capabilities rather than comparing roles directly, so a richer role
/// hierarchy can be introduced without touching the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Platform governance: delete any restaurant, toggle any restaurant's
    /// active flag, and act on any menu item regardless of ownership.
    Admin,
}

impl Role {
    /// grants
    ///
    /// The role-to-capability table. Total over both enums.
    pub fn grants(&self, capability: Capability) -> bool {
        match (self, capability) {
            (Role::Admin, Capability::Admin) => true,
            (Role::Owner, Capability::Admin) => false,
        }
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

/// Claims
///
/// The payload structure expected inside an incoming JSON Web Token (JWT).
/// Signed by the external identity provider's secret and validated on every
/// authenticated request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the UUID of the authenticated user.
    pub sub: Uuid,
    /// The user's role, embedded at token issuance.
    pub role: Role,
    /// Expiration Time (exp): timestamp after which the JWT must be rejected.
    pub exp: usize,
    /// Issued At (iat): timestamp when the JWT was issued.
    pub iat: usize,
}

/// Identity
///
/// The resolved identity of an authenticated request: who is calling, and
/// with what role. This is the value every authorization-checked service
/// operation receives explicitly — the services never consult ambient
/// request state, which keeps the authorization predicate a pure function
/// of (identity, resource).
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    /// The unique identifier of the user, as carried in the JWT `sub` claim.
    pub user_id: Uuid,
    /// The user's role, used for capability checks.
    pub role: Role,
}

impl Identity {
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.role.grants(capability)
    }

    /// can_manage
    ///
    /// The shared authorization predicate: an identity may mutate a resource
    /// if it owns it or holds the Admin capability. Pure and total — callers
    /// convert a false result into a Forbidden error.
    pub fn can_manage(&self, resource_owner_id: Uuid) -> bool {
        self.user_id == resource_owner_id || self.has_capability(Capability::Admin)
    }
}

/// Identity Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making Identity usable as a
/// function argument in any authenticated handler. This cleanly separates
/// authentication (extractor) from business logic (service), and is the only
/// place in the application where a caller identity is materialized.
///
/// The process:
/// 1. Dependency Resolution: pull AppConfig from the application state.
/// 2. Local Bypass: development-time access via 'x-user-id'/'x-user-role' headers.
/// 3. Token Validation: standard Bearer token extraction and JWT decoding.
///
/// Rejection: StatusCode::UNAUTHORIZED (401) on any failure.
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    // Allows the extractor to pull the AppConfig (for JWT secret and Env check).
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // 1. Dependency Resolution
        let config = AppConfig::from_ref(state);

        // 2. Local Development Bypass Check
        // In Env::Local, a caller identity can be supplied directly through
        // the 'x-user-id' and 'x-user-role' headers. Guarded by the Env check
        // so it can never activate in production.
        if config.env == Env::Local {
            let header_id = parts
                .headers
                .get("x-user-id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| Uuid::parse_str(s).ok());

            if let Some(user_id) = header_id {
                let role = parts
                    .headers
                    .get("x-user-role")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<Role>().ok())
                    .unwrap_or_default();

                return Ok(Identity { user_id, role });
            }
        }
        // If Env is Production, or if the bypass headers were absent or bad,
        // execution falls through to the standard JWT validation flow.

        // 3. Token Extraction
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        // 4. JWT Decoding Setup
        let secret = &config.jwt_secret;
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::default();

        // Ensure expiration time validation is always active.
        validation.validate_exp = true;

        // 5. Decode and Validate the Token
        let token_data = match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(data) => data,
            Err(e) => {
                match e.kind() {
                    // Token expired: the most common failure for a valid-but-old token.
                    ErrorKind::ExpiredSignature => return Err(StatusCode::UNAUTHORIZED),
                    // All other failure types (bad signature, malformed token, etc.).
                    _ => return Err(StatusCode::UNAUTHORIZED),
                }
            }
        };

        // Success: the claims carry everything the application needs; there
        // is no user table to consult.
        Ok(Identity {
            user_id: token_data.claims.sub,
            role: token_data.claims.role,
        })
    }
}
