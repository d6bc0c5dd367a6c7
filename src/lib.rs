//! # Campaign Desk
//!
//! A multi-tenant campaign management server: organizations keep their
//! clients, campaigns, adverts, concept notes and budgets behind JWT
//! authentication with role-based access.
//!
//! ## Overview
//!
//! Campaign Desk can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `campaign-server` binary
//! 2. **As a library** - Build the router into your own Axum application
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use campaign_desk::{api::routes::create_app, AppConfig, AppState, DatabaseProvider};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load("campaign.toml")?;
//!     let auth = config.resolve_auth()?;
//!     let db = DatabaseProvider::from_config(&config).create_client().await?;
//!
//!     let state = AppState::new(config, db, &auth)?;
//!     let app = create_app(state)?;
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `local-db` | Local SQLite database (default) |
//! | `turso` | Remote Turso database |
//! | `swagger-ui` | Interactive API docs at `/swagger-ui` |
//! | `ui` | Serve the embedded Leptos frontend |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Tokens, passwords, login and middleware
//! - [`db`] - Database abstraction (SQLite, Turso)
//! - [`services`] - Tenant-scoped domain services
//! - [`types`] - Entities, payloads and error handling
//! - [`utils`] - Configuration loading

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Authentication: tokens, passwords, login and middleware.
pub mod auth;
/// Command-line interface for the server binary.
pub mod cli;
/// Database clients (SQLite, Turso).
pub mod db;
/// Tenant-scoped domain services.
pub mod services;
/// Core types (entities, requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use auth::{AuthService, TokenService};
pub use db::{DatabaseClient, DatabaseProvider, TursoClient};
pub use types::{AppError, Result};
pub use utils::toml_config::{AppConfig, ConfigError, ResolvedAuth};

use services::{
    AdvertService, BudgetService, CampaignService, ClientService, ConceptNoteService,
    DashboardService,
};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Validated configuration
    pub config: Arc<AppConfig>,
    /// Database client
    pub db: Arc<dyn DatabaseClient>,
    /// Token issuance and validation
    pub token_service: Arc<TokenService>,
    /// Login, registration and user management
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wires the services around an open database.
    pub fn new(config: AppConfig, db: Arc<dyn DatabaseClient>, auth: &ResolvedAuth) -> Result<Self> {
        let token_service = Arc::new(TokenService::from_config(auth));
        let auth_service = Arc::new(AuthService::new(db.clone(), token_service.clone())?);

        Ok(Self {
            config: Arc::new(config),
            db,
            token_service,
            auth_service,
        })
    }

    pub fn clients(&self) -> ClientService {
        ClientService::new(self.db.clone())
    }

    pub fn campaigns(&self) -> CampaignService {
        CampaignService::new(self.db.clone())
    }

    pub fn adverts(&self) -> AdvertService {
        AdvertService::new(self.db.clone())
    }

    pub fn concept_notes(&self) -> ConceptNoteService {
        ConceptNoteService::new(self.db.clone())
    }

    pub fn budgets(&self) -> BudgetService {
        BudgetService::new(self.db.clone())
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.db.clone())
    }
}
