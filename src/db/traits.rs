//! Database abstraction traits
//!
//! This module provides the `DatabaseClient` trait that abstracts over different
//! database backends (in-memory SQLite, file-based SQLite, remote Turso).
//!
//! Every read and write of tenant-owned data takes the tenant id explicitly;
//! rows of another tenant are invisible to it.
//!
//! # Example
//!
//! ```rust,ignore
//! use campaign_desk::db::DatabaseProvider;
//!
//! // Use in-memory database (default for development/testing)
//! let db = DatabaseProvider::Memory.create_client().await?;
//!
//! // Use file-based SQLite
//! let db = DatabaseProvider::SQLite { path: "data.db".into() }.create_client().await?;
//! ```

use crate::types::{
    Advert, Budget, BudgetTotal, Campaign, CampaignFilter, Client, ConceptNote, DashboardStats,
    Result, Tenant, User,
};
use crate::utils::toml_config::AppConfig;
use async_trait::async_trait;
use std::sync::Arc;

/// Database provider configuration
#[derive(Debug, Clone, Default)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso database (requires network access)
    #[cfg(feature = "turso")]
    Turso {
        /// The Turso database URL (e.g., `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the Turso database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Create a database client from this provider configuration
    pub async fn create_client(&self) -> Result<Arc<dyn DatabaseClient>> {
        match self {
            DatabaseProvider::Memory => {
                let client = super::turso::TursoClient::new_memory().await?;
                Ok(Arc::new(client))
            }
            DatabaseProvider::SQLite { path } => {
                let client = super::turso::TursoClient::new_local(path).await?;
                Ok(Arc::new(client))
            }
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { url, auth_token } => {
                let client =
                    super::turso::TursoClient::new_remote(url.clone(), auth_token.clone()).await?;
                Ok(Arc::new(client))
            }
        }
    }

    /// Short name for logs; never includes credentials.
    pub fn kind(&self) -> &'static str {
        match self {
            DatabaseProvider::Memory => "in-memory",
            DatabaseProvider::SQLite { .. } => "sqlite",
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { .. } => "turso",
        }
    }

    /// Pick the provider described by the `[database]` table.
    ///
    /// Turso wins when its env vars are configured and set, then a file path,
    /// then memory.
    pub fn from_config(config: &AppConfig) -> Self {
        #[cfg(feature = "turso")]
        {
            if let Some((url, auth_token)) = config.turso_credentials() {
                return DatabaseProvider::Turso { url, auth_token };
            }
        }

        let url = config.database.url.trim();
        if url.is_empty() || url == ":memory:" {
            DatabaseProvider::Memory
        } else {
            DatabaseProvider::SQLite {
                path: url.to_string(),
            }
        }
    }
}

/// Abstract trait for database operations
///
/// This trait defines all database operations needed by the application.
/// Implementations can use different backends (SQLite, Turso, etc.)
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Cheap round trip used by readiness checks
    async fn ping(&self) -> Result<()>;

    // ============== Tenant & User Operations ==============

    /// Create a tenant together with its first user, atomically
    async fn create_tenant_with_admin(&self, tenant: &Tenant, admin: &User) -> Result<()>;

    async fn get_tenant(&self, id: &str) -> Result<Option<Tenant>>;

    /// Create a user; a duplicate email is a `Conflict`
    async fn create_user(&self, user: &User) -> Result<()>;

    /// Get a user by (already normalized) email
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;

    async fn list_users(&self, tenant_id: &str) -> Result<Vec<User>>;

    // ============== Client Operations ==============

    async fn insert_client(&self, client: &Client) -> Result<()>;

    async fn get_client(&self, tenant_id: &str, id: &str) -> Result<Option<Client>>;

    async fn list_clients(&self, tenant_id: &str) -> Result<Vec<Client>>;

    async fn update_client(&self, client: &Client) -> Result<()>;

    /// Returns whether a row was deleted
    async fn delete_client(&self, tenant_id: &str, id: &str) -> Result<bool>;

    // ============== Campaign Operations ==============

    async fn insert_campaign(&self, campaign: &Campaign) -> Result<()>;

    async fn get_campaign(&self, tenant_id: &str, id: &str) -> Result<Option<Campaign>>;

    async fn list_campaigns(&self, tenant_id: &str, filter: &CampaignFilter)
        -> Result<Vec<Campaign>>;

    async fn update_campaign(&self, campaign: &Campaign) -> Result<()>;

    /// Delete a campaign with its adverts, concept notes and budgets
    async fn delete_campaign(&self, tenant_id: &str, id: &str) -> Result<bool>;

    async fn count_campaigns_for_client(&self, tenant_id: &str, client_id: &str) -> Result<i64>;

    // ============== Advert Operations ==============

    async fn insert_advert(&self, advert: &Advert) -> Result<()>;

    async fn get_advert(&self, tenant_id: &str, id: &str) -> Result<Option<Advert>>;

    async fn list_adverts(&self, tenant_id: &str, campaign_id: Option<&str>)
        -> Result<Vec<Advert>>;

    async fn update_advert(&self, advert: &Advert) -> Result<()>;

    async fn delete_advert(&self, tenant_id: &str, id: &str) -> Result<bool>;

    // ============== Concept Note Operations ==============

    async fn insert_concept_note(&self, note: &ConceptNote) -> Result<()>;

    async fn get_concept_note(&self, tenant_id: &str, id: &str) -> Result<Option<ConceptNote>>;

    async fn list_concept_notes(
        &self,
        tenant_id: &str,
        campaign_id: Option<&str>,
    ) -> Result<Vec<ConceptNote>>;

    async fn update_concept_note(&self, note: &ConceptNote) -> Result<()>;

    async fn delete_concept_note(&self, tenant_id: &str, id: &str) -> Result<bool>;

    // ============== Budget Operations ==============

    async fn insert_budget(&self, budget: &Budget) -> Result<()>;

    async fn get_budget(&self, tenant_id: &str, id: &str) -> Result<Option<Budget>>;

    async fn list_budgets(&self, tenant_id: &str, campaign_id: Option<&str>)
        -> Result<Vec<Budget>>;

    async fn update_budget(&self, budget: &Budget) -> Result<()>;

    async fn delete_budget(&self, tenant_id: &str, id: &str) -> Result<bool>;

    /// Sum of budget lines of a campaign, one entry per currency
    async fn budget_totals(&self, tenant_id: &str, campaign_id: &str) -> Result<Vec<BudgetTotal>>;

    // ============== Reporting ==============

    async fn dashboard_stats(&self, tenant_id: &str) -> Result<DashboardStats>;
}
