//! JWT Authentication and Middleware
//!
//! This module provides the authentication infrastructure for the Campaign
//! Desk API: password hashing, bearer token issuance and validation, the
//! login/registration service, and Axum middleware.
//!
//! # Module Structure
//!
//! - [`auth::jwt`](crate::auth::jwt) - Token issuance and validation
//! - [`auth::password`](crate::auth::password) - Argon2id hashing
//! - [`auth::service`](crate::auth::service) - Login, registration, tenant members
//! - [`auth::middleware`](crate::auth::middleware) - Axum layer and extractor
//!
//! # Security Features
//!
//! - **Password Hashing**: Argon2id (memory-hard), verified by the argon2 crate
//! - **JWT Tokens**: HS256, issuer and audience pinned, zero leeway on expiry
//! - **Uniform Failures**: unknown email and wrong password are indistinguishable
//!
//! # Extracting Claims in Handlers
//!
//! ```ignore
//! async fn protected_handler(AuthUser(claims): AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}!", claims.email)
//! }
//! ```
//!
//! # Configuration
//!
//! Configure via `campaign.toml`:
//! ```toml
//! [auth]
//! jwt_secret_env = "JWT_SECRET"   # env var holding a >= 32 byte secret
//! issuer = "campaign-desk"
//! audience = "campaign-desk-web"
//! access_expiry = 3600            # seconds
//! ```

/// Token issuance and validation.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
/// Password hashing helpers.
pub mod password;
/// Credential verification and account management.
pub mod service;

pub use jwt::TokenService;
pub use middleware::{auth_middleware, AuthUser};
pub use service::AuthService;
