//! Tenant-scoped domain services.
//!
//! Each service is a thin facade over [`DatabaseClient`](crate::db::DatabaseClient)
//! that applies role policy and input validation. The tenant always comes from
//! the caller's [`Claims`]; rows belonging to another tenant surface as
//! `NotFound`.
//!
//! Role policy:
//!
//! | Role    | Read | Create / Update | Delete |
//! |---------|------|-----------------|--------|
//! | admin   | yes  | yes             | yes    |
//! | manager | yes  | yes             | no     |
//! | viewer  | yes  | no              | no     |

pub mod advert;
pub mod budget;
pub mod campaign;
pub mod client;
pub mod concept_note;
pub mod dashboard;

pub use advert::AdvertService;
pub use budget::BudgetService;
pub use campaign::CampaignService;
pub use client::ClientService;
pub use concept_note::ConceptNoteService;
pub use dashboard::DashboardService;

use crate::db::DatabaseClient;
use crate::types::{AppError, Campaign, Claims, Result};
use chrono::{DateTime, SubsecRound, Utc};

pub(crate) fn require_write(claims: &Claims) -> Result<()> {
    if claims.role.can_write() {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Role '{}' cannot modify records",
            claims.role
        )))
    }
}

pub(crate) fn require_admin(claims: &Claims) -> Result<()> {
    if claims.role.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin role required".to_string()))
    }
}

/// Trimmed value of a required text field.
pub(crate) fn non_empty(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Trimmed optional text; blank strings become `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Current time at the precision the store keeps.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Campaign of the caller's tenant, or `NotFound`.
pub(crate) async fn campaign_in_tenant(
    db: &dyn DatabaseClient,
    claims: &Claims,
    campaign_id: &str,
) -> Result<Campaign> {
    db.get_campaign(&claims.tenant, campaign_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Campaign {} not found", campaign_id)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::db::{DatabaseClient, TursoClient};
    use crate::types::{Claims, Role, Tenant, User};
    use std::sync::Arc;

    pub async fn memory_db() -> Arc<dyn DatabaseClient> {
        Arc::new(TursoClient::new_memory().await.expect("memory db"))
    }

    /// Creates a tenant with one user and returns claims for that user.
    pub async fn tenant_with(db: &Arc<dyn DatabaseClient>, role: Role) -> Claims {
        let now = super::now();
        let tenant = Tenant {
            id: super::new_id(),
            name: "Acme".to_string(),
            created_at: now,
        };
        let user = User {
            id: super::new_id(),
            tenant_id: tenant.id.clone(),
            email: format!("{}@acme.test", super::new_id()),
            name: "Tester".to_string(),
            password_hash: "unused".to_string(),
            role,
            created_at: now,
            updated_at: now,
        };
        db.create_tenant_with_admin(&tenant, &user)
            .await
            .expect("tenant");

        claims_for(&user)
    }

    /// Claims for another user in the same tenant as `claims`.
    pub fn same_tenant(claims: &Claims, role: Role) -> Claims {
        Claims {
            sub: super::new_id(),
            role,
            ..claims.clone()
        }
    }

    fn claims_for(user: &User) -> Claims {
        Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            tenant: user.tenant_id.clone(),
            iss: "test".to_string(),
            aud: "test".to_string(),
            iat: 0,
            exp: i64::MAX,
        }
    }
}
