use super::{
    campaign_in_tenant, new_id, non_empty, now, optional_text, require_admin, require_write,
};
use crate::db::DatabaseClient;
use crate::types::{
    AppError, BudgetSummary, Campaign, CampaignFilter, Claims, CreateCampaignRequest, Result,
    UpdateCampaignRequest,
};
use chrono::NaiveDate;
use std::sync::Arc;

pub struct CampaignService {
    db: Arc<dyn DatabaseClient>,
}

impl CampaignService {
    pub fn new(db: Arc<dyn DatabaseClient>) -> Self {
        Self { db }
    }

    pub async fn list(&self, claims: &Claims, filter: &CampaignFilter) -> Result<Vec<Campaign>> {
        self.db.list_campaigns(&claims.tenant, filter).await
    }

    pub async fn get(&self, claims: &Claims, id: &str) -> Result<Campaign> {
        campaign_in_tenant(self.db.as_ref(), claims, id).await
    }

    pub async fn create(&self, claims: &Claims, req: CreateCampaignRequest) -> Result<Campaign> {
        require_write(claims)?;
        self.ensure_client(claims, &req.client_id).await?;
        check_dates(req.start_date, req.end_date)?;

        let timestamp = now();
        let campaign = Campaign {
            id: new_id(),
            tenant_id: claims.tenant.clone(),
            client_id: req.client_id,
            name: non_empty("name", &req.name)?,
            description: optional_text(req.description),
            status: req.status.unwrap_or_default(),
            start_date: req.start_date,
            end_date: req.end_date,
            created_at: timestamp,
            updated_at: timestamp,
        };

        self.db.insert_campaign(&campaign).await?;
        tracing::info!(campaign_id = %campaign.id, tenant = %campaign.tenant_id, "Campaign created");

        Ok(campaign)
    }

    pub async fn update(
        &self,
        claims: &Claims,
        id: &str,
        req: UpdateCampaignRequest,
    ) -> Result<Campaign> {
        require_write(claims)?;
        let mut campaign = self.get(claims, id).await?;

        if let Some(client_id) = req.client_id {
            self.ensure_client(claims, &client_id).await?;
            campaign.client_id = client_id;
        }
        if let Some(name) = req.name {
            campaign.name = non_empty("name", &name)?;
        }
        if let Some(description) = req.description {
            campaign.description = optional_text(Some(description));
        }
        if let Some(status) = req.status {
            campaign.status = status;
        }
        if let Some(start_date) = req.start_date {
            campaign.start_date = start_date;
        }
        if let Some(end_date) = req.end_date {
            campaign.end_date = end_date;
        }
        check_dates(campaign.start_date, campaign.end_date)?;
        campaign.updated_at = now();

        self.db.update_campaign(&campaign).await?;
        Ok(campaign)
    }

    /// Deletes a campaign with all of its adverts, concept notes and budgets.
    pub async fn delete(&self, claims: &Claims, id: &str) -> Result<()> {
        require_admin(claims)?;

        if !self.db.delete_campaign(&claims.tenant, id).await? {
            return Err(AppError::NotFound(format!("Campaign {} not found", id)));
        }
        tracing::info!(campaign_id = %id, tenant = %claims.tenant, "Campaign deleted");
        Ok(())
    }

    pub async fn budget_summary(&self, claims: &Claims, id: &str) -> Result<BudgetSummary> {
        let campaign = self.get(claims, id).await?;
        let totals = self.db.budget_totals(&claims.tenant, &campaign.id).await?;

        Ok(BudgetSummary {
            campaign_id: campaign.id,
            totals,
        })
    }

    async fn ensure_client(&self, claims: &Claims, client_id: &str) -> Result<()> {
        match self.db.get_client(&claims.tenant, client_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Client {} not found", client_id))),
        }
    }
}

fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<()> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(AppError::InvalidInput(format!(
            "end_date {} is before start_date {}",
            end, start
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{memory_db, tenant_with};
    use crate::services::ClientService;
    use crate::types::{CampaignStatus, CreateClientRequest, Role};

    async fn setup() -> (CampaignService, Claims, String) {
        let db = memory_db().await;
        let admin = tenant_with(&db, Role::Admin).await;
        let client = ClientService::new(db.clone())
            .create(
                &admin,
                CreateClientRequest {
                    name: "Northwind".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        (CampaignService::new(db), admin, client.id)
    }

    fn request(client_id: &str, name: &str) -> CreateCampaignRequest {
        CreateCampaignRequest {
            client_id: client_id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_draft() {
        let (service, admin, client_id) = setup().await;

        let campaign = service
            .create(&admin, request(&client_id, "Spring launch"))
            .await
            .unwrap();

        assert_eq!(campaign.status, CampaignStatus::Draft);
        assert_eq!(service.get(&admin, &campaign.id).await.unwrap(), campaign);
    }

    #[tokio::test]
    async fn test_unknown_client_is_not_found() {
        let (service, admin, _) = setup().await;

        let err = service
            .create(&admin, request("missing", "Orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_end_before_start_rejected() {
        let (service, admin, client_id) = setup().await;

        let err = service
            .create(
                &admin,
                CreateCampaignRequest {
                    start_date: NaiveDate::from_ymd_opt(2026, 5, 1),
                    end_date: NaiveDate::from_ymd_opt(2026, 4, 1),
                    ..request(&client_id, "Backwards")
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_filters() {
        let (service, admin, client_id) = setup().await;
        let first = service
            .create(&admin, request(&client_id, "One"))
            .await
            .unwrap();
        service
            .create(
                &admin,
                CreateCampaignRequest {
                    status: Some(CampaignStatus::Active),
                    ..request(&client_id, "Two")
                },
            )
            .await
            .unwrap();

        let drafts = service
            .list(
                &admin,
                &CampaignFilter {
                    status: Some(CampaignStatus::Draft),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(drafts, vec![first]);

        let by_client = service
            .list(
                &admin,
                &CampaignFilter {
                    client_id: Some(client_id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_client.len(), 2);
    }

    #[tokio::test]
    async fn test_update_changes_status_only() {
        let (service, admin, client_id) = setup().await;
        let campaign = service
            .create(&admin, request(&client_id, "Summer"))
            .await
            .unwrap();

        let updated = service
            .update(
                &admin,
                &campaign.id,
                UpdateCampaignRequest {
                    status: Some(CampaignStatus::Paused),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, CampaignStatus::Paused);
        assert_eq!(updated.name, "Summer");
    }

    #[tokio::test]
    async fn test_update_clears_and_keeps_dates() {
        let (service, admin, client_id) = setup().await;
        let campaign = service
            .create(
                &admin,
                CreateCampaignRequest {
                    start_date: NaiveDate::from_ymd_opt(2026, 3, 1),
                    end_date: NaiveDate::from_ymd_opt(2026, 5, 31),
                    ..request(&client_id, "Spring")
                },
            )
            .await
            .unwrap();

        let cleared = service
            .update(
                &admin,
                &campaign.id,
                UpdateCampaignRequest {
                    end_date: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.start_date, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(cleared.end_date, None);

        let stored = service.get(&admin, &campaign.id).await.unwrap();
        assert_eq!(stored.end_date, None);
        assert_eq!(stored.start_date, NaiveDate::from_ymd_opt(2026, 3, 1));
    }
}
