//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Campaign Desk, built on the
//! Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//! - [`api::openapi`](crate::api::openapi) - OpenAPI document
//!
//! # API Endpoints
//!
//! ## Authentication (`/api/auth`)
//! - `POST /api/auth/register` - Create an organization and its admin
//! - `POST /api/auth/login` - Login and receive a JWT
//! - `GET /api/auth/me` - Current user
//!
//! ## Users (`/api/users`)
//! - `GET /api/users` - Members of the caller's organization
//! - `POST /api/users` - Add a member (admin)
//!
//! ## Campaign data
//! - `/api/clients`, `/api/campaigns`, `/api/adverts`, `/api/concept-notes`,
//!   `/api/budgets` - list/create, plus `/{id}` for read/update/delete
//! - `GET /api/campaigns/{id}/budget-summary` - Totals per currency
//! - `GET /api/dashboard` - Counts for the dashboard
//!
//! ## Health
//! - `GET /health` - Liveness, no authentication
//!
//! # Authentication
//!
//! Every endpoint except health, login and register requires a valid JWT in
//! the `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! # OpenAPI Documentation
//!
//! The document is served at `/api-docs/openapi.json`. When the `swagger-ui`
//! feature is enabled, interactive documentation is available at
//! `/swagger-ui/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// OpenAPI document.
pub mod openapi;
/// Router configuration and route definitions.
pub mod routes;
/// Embedded frontend assets.
#[cfg(feature = "ui")]
pub mod ui;
