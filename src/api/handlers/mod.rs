//! API request handlers.
//!
//! Handlers extract the caller with [`AuthUser`](crate::auth::AuthUser) and
//! delegate to the domain services; they hold no business rules themselves.

/// Advert handlers.
pub mod adverts;
/// Authentication handlers (login, register, me).
pub mod auth;
/// Budget line handlers.
pub mod budgets;
/// Campaign handlers and budget summary.
pub mod campaigns;
/// Client handlers.
pub mod clients;
/// Concept note handlers.
pub mod concept_notes;
/// Dashboard counts.
pub mod dashboard;
/// Health check.
pub mod health;
/// Tenant user management.
pub mod users;
