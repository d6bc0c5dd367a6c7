use super::{
    campaign_in_tenant, new_id, non_empty, now, optional_text, require_admin, require_write,
};
use crate::db::DatabaseClient;
use crate::types::{
    Advert, AppError, Claims, CreateAdvertRequest, Result, UpdateAdvertRequest,
};
use std::sync::Arc;

pub struct AdvertService {
    db: Arc<dyn DatabaseClient>,
}

impl AdvertService {
    pub fn new(db: Arc<dyn DatabaseClient>) -> Self {
        Self { db }
    }

    pub async fn list(&self, claims: &Claims, campaign_id: Option<&str>) -> Result<Vec<Advert>> {
        self.db.list_adverts(&claims.tenant, campaign_id).await
    }

    pub async fn get(&self, claims: &Claims, id: &str) -> Result<Advert> {
        self.db
            .get_advert(&claims.tenant, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Advert {} not found", id)))
    }

    pub async fn create(&self, claims: &Claims, req: CreateAdvertRequest) -> Result<Advert> {
        require_write(claims)?;
        let campaign = campaign_in_tenant(self.db.as_ref(), claims, &req.campaign_id).await?;

        let timestamp = now();
        let advert = Advert {
            id: new_id(),
            tenant_id: claims.tenant.clone(),
            campaign_id: campaign.id,
            title: non_empty("title", &req.title)?,
            channel: req.channel,
            content: optional_text(req.content),
            status: req.status.unwrap_or_default(),
            created_at: timestamp,
            updated_at: timestamp,
        };

        self.db.insert_advert(&advert).await?;
        Ok(advert)
    }

    pub async fn update(
        &self,
        claims: &Claims,
        id: &str,
        req: UpdateAdvertRequest,
    ) -> Result<Advert> {
        require_write(claims)?;
        let mut advert = self.get(claims, id).await?;

        if let Some(title) = req.title {
            advert.title = non_empty("title", &title)?;
        }
        if let Some(channel) = req.channel {
            advert.channel = channel;
        }
        if let Some(content) = req.content {
            advert.content = optional_text(Some(content));
        }
        if let Some(status) = req.status {
            advert.status = status;
        }
        advert.updated_at = now();

        self.db.update_advert(&advert).await?;
        Ok(advert)
    }

    pub async fn delete(&self, claims: &Claims, id: &str) -> Result<()> {
        require_admin(claims)?;

        if !self.db.delete_advert(&claims.tenant, id).await? {
            return Err(AppError::NotFound(format!("Advert {} not found", id)));
        }
        Ok(())
    }
}
