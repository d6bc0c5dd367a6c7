use super::{campaign_in_tenant, new_id, non_empty, now, require_admin, require_write};
use crate::db::DatabaseClient;
use crate::types::{
    AppError, Claims, ConceptNote, CreateConceptNoteRequest, Result, UpdateConceptNoteRequest,
};
use std::sync::Arc;

/// Creative briefs attached to a campaign. The author is the caller.
pub struct ConceptNoteService {
    db: Arc<dyn DatabaseClient>,
}

impl ConceptNoteService {
    pub fn new(db: Arc<dyn DatabaseClient>) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        claims: &Claims,
        campaign_id: Option<&str>,
    ) -> Result<Vec<ConceptNote>> {
        self.db.list_concept_notes(&claims.tenant, campaign_id).await
    }

    pub async fn get(&self, claims: &Claims, id: &str) -> Result<ConceptNote> {
        self.db
            .get_concept_note(&claims.tenant, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Concept note {} not found", id)))
    }

    pub async fn create(
        &self,
        claims: &Claims,
        req: CreateConceptNoteRequest,
    ) -> Result<ConceptNote> {
        require_write(claims)?;
        let campaign = campaign_in_tenant(self.db.as_ref(), claims, &req.campaign_id).await?;

        let timestamp = now();
        let note = ConceptNote {
            id: new_id(),
            tenant_id: claims.tenant.clone(),
            campaign_id: campaign.id,
            title: non_empty("title", &req.title)?,
            body: req.body.trim().to_string(),
            author_id: claims.sub.clone(),
            created_at: timestamp,
            updated_at: timestamp,
        };

        self.db.insert_concept_note(&note).await?;
        Ok(note)
    }

    pub async fn update(
        &self,
        claims: &Claims,
        id: &str,
        req: UpdateConceptNoteRequest,
    ) -> Result<ConceptNote> {
        require_write(claims)?;
        let mut note = self.get(claims, id).await?;

        if let Some(title) = req.title {
            note.title = non_empty("title", &title)?;
        }
        if let Some(body) = req.body {
            note.body = body.trim().to_string();
        }
        note.updated_at = now();

        self.db.update_concept_note(&note).await?;
        Ok(note)
    }

    pub async fn delete(&self, claims: &Claims, id: &str) -> Result<()> {
        require_admin(claims)?;

        if !self.db.delete_concept_note(&claims.tenant, id).await? {
            return Err(AppError::NotFound(format!("Concept note {} not found", id)));
        }
        Ok(())
    }
}
