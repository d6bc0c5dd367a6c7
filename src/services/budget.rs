use super::{
    campaign_in_tenant, new_id, non_empty, now, optional_text, require_admin, require_write,
};
use crate::db::DatabaseClient;
use crate::types::{AppError, Budget, Claims, CreateBudgetRequest, Result, UpdateBudgetRequest};
use std::sync::Arc;

/// Budget lines of a campaign, in minor units of an ISO 4217 currency.
pub struct BudgetService {
    db: Arc<dyn DatabaseClient>,
}

impl BudgetService {
    pub fn new(db: Arc<dyn DatabaseClient>) -> Self {
        Self { db }
    }

    pub async fn list(&self, claims: &Claims, campaign_id: Option<&str>) -> Result<Vec<Budget>> {
        self.db.list_budgets(&claims.tenant, campaign_id).await
    }

    pub async fn get(&self, claims: &Claims, id: &str) -> Result<Budget> {
        self.db
            .get_budget(&claims.tenant, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Budget {} not found", id)))
    }

    pub async fn create(&self, claims: &Claims, req: CreateBudgetRequest) -> Result<Budget> {
        require_write(claims)?;
        let campaign = campaign_in_tenant(self.db.as_ref(), claims, &req.campaign_id).await?;

        let timestamp = now();
        let budget = Budget {
            id: new_id(),
            tenant_id: claims.tenant.clone(),
            campaign_id: campaign.id,
            category: non_empty("category", &req.category)?,
            amount_cents: check_amount(req.amount_cents)?,
            currency: normalize_currency(&req.currency)?,
            notes: optional_text(req.notes),
            created_at: timestamp,
            updated_at: timestamp,
        };

        self.db.insert_budget(&budget).await?;
        Ok(budget)
    }

    pub async fn update(
        &self,
        claims: &Claims,
        id: &str,
        req: UpdateBudgetRequest,
    ) -> Result<Budget> {
        require_write(claims)?;
        let mut budget = self.get(claims, id).await?;

        if let Some(category) = req.category {
            budget.category = non_empty("category", &category)?;
        }
        if let Some(amount) = req.amount_cents {
            budget.amount_cents = check_amount(amount)?;
        }
        if let Some(currency) = req.currency {
            budget.currency = normalize_currency(&currency)?;
        }
        if let Some(notes) = req.notes {
            budget.notes = optional_text(Some(notes));
        }
        budget.updated_at = now();

        self.db.update_budget(&budget).await?;
        Ok(budget)
    }

    pub async fn delete(&self, claims: &Claims, id: &str) -> Result<()> {
        require_admin(claims)?;

        if !self.db.delete_budget(&claims.tenant, id).await? {
            return Err(AppError::NotFound(format!("Budget {} not found", id)));
        }
        Ok(())
    }
}

/// Largest accepted budget line, in minor units.
pub const MAX_AMOUNT_CENTS: i64 = 1_000_000_000_000_000;

fn check_amount(amount_cents: i64) -> Result<i64> {
    if amount_cents < 0 {
        return Err(AppError::InvalidInput(
            "amount_cents must not be negative".to_string(),
        ));
    }
    if amount_cents > MAX_AMOUNT_CENTS {
        return Err(AppError::InvalidInput(format!(
            "amount_cents must not exceed {}",
            MAX_AMOUNT_CENTS
        )));
    }
    Ok(amount_cents)
}

/// Three ASCII letters, returned upper-cased.
fn normalize_currency(currency: &str) -> Result<String> {
    let code = currency.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::InvalidInput(format!(
            "Invalid currency code: {}",
            currency
        )));
    }
    Ok(code.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{memory_db, tenant_with};
    use crate::services::{CampaignService, ClientService};
    use crate::types::{BudgetTotal, CreateCampaignRequest, CreateClientRequest, Role};

    #[test]
    fn test_currency_normalization() {
        assert_eq!(normalize_currency(" eur ").unwrap(), "EUR");
        assert!(normalize_currency("EURO").is_err());
        assert!(normalize_currency("U$D").is_err());
    }

    #[test]
    fn test_amount_bounds() {
        assert!(check_amount(0).is_ok());
        assert!(check_amount(MAX_AMOUNT_CENTS).is_ok());
        assert!(matches!(check_amount(-1), Err(AppError::InvalidInput(_))));
        assert!(matches!(
            check_amount(MAX_AMOUNT_CENTS + 1),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            check_amount(i64::MAX),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_summary_totals_per_currency() {
        let db = memory_db().await;
        let admin = tenant_with(&db, Role::Admin).await;
        let client = ClientService::new(db.clone())
            .create(
                &admin,
                CreateClientRequest {
                    name: "Hooli".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let campaigns = CampaignService::new(db.clone());
        let campaign = campaigns
            .create(
                &admin,
                CreateCampaignRequest {
                    client_id: client.id,
                    name: "Launch".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let service = BudgetService::new(db);

        for (category, amount, currency) in [
            ("Media", 150_000, "usd"),
            ("Production", 50_000, "USD"),
            ("Events", 20_000, "EUR"),
        ] {
            service
                .create(
                    &admin,
                    CreateBudgetRequest {
                        campaign_id: campaign.id.clone(),
                        category: category.to_string(),
                        amount_cents: amount,
                        currency: currency.to_string(),
                        notes: None,
                    },
                )
                .await
                .unwrap();
        }

        let summary = campaigns.budget_summary(&admin, &campaign.id).await.unwrap();
        assert_eq!(
            summary.totals,
            vec![
                BudgetTotal {
                    currency: "EUR".to_string(),
                    amount_cents: 20_000
                },
                BudgetTotal {
                    currency: "USD".to_string(),
                    amount_cents: 200_000
                },
            ]
        );
    }
}
