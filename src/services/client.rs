use super::{new_id, non_empty, now, optional_text, require_admin, require_write};
use crate::db::DatabaseClient;
use crate::types::{AppError, Claims, Client, CreateClientRequest, Result, UpdateClientRequest};
use std::sync::Arc;

/// Advertisers a tenant runs campaigns for.
pub struct ClientService {
    db: Arc<dyn DatabaseClient>,
}

impl ClientService {
    pub fn new(db: Arc<dyn DatabaseClient>) -> Self {
        Self { db }
    }

    pub async fn list(&self, claims: &Claims) -> Result<Vec<Client>> {
        self.db.list_clients(&claims.tenant).await
    }

    pub async fn get(&self, claims: &Claims, id: &str) -> Result<Client> {
        self.db
            .get_client(&claims.tenant, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))
    }

    pub async fn create(&self, claims: &Claims, req: CreateClientRequest) -> Result<Client> {
        require_write(claims)?;

        let timestamp = now();
        let client = Client {
            id: new_id(),
            tenant_id: claims.tenant.clone(),
            name: non_empty("name", &req.name)?,
            contact_name: optional_text(req.contact_name),
            contact_email: validated_email(optional_text(req.contact_email))?,
            phone: optional_text(req.phone),
            notes: optional_text(req.notes),
            created_at: timestamp,
            updated_at: timestamp,
        };

        self.db.insert_client(&client).await?;
        tracing::info!(client_id = %client.id, tenant = %client.tenant_id, "Client created");

        Ok(client)
    }

    pub async fn update(
        &self,
        claims: &Claims,
        id: &str,
        req: UpdateClientRequest,
    ) -> Result<Client> {
        require_write(claims)?;
        let mut client = self.get(claims, id).await?;

        if let Some(name) = req.name {
            client.name = non_empty("name", &name)?;
        }
        if let Some(contact_name) = req.contact_name {
            client.contact_name = optional_text(Some(contact_name));
        }
        if let Some(contact_email) = req.contact_email {
            client.contact_email = validated_email(optional_text(Some(contact_email)))?;
        }
        if let Some(phone) = req.phone {
            client.phone = optional_text(Some(phone));
        }
        if let Some(notes) = req.notes {
            client.notes = optional_text(Some(notes));
        }
        client.updated_at = now();

        self.db.update_client(&client).await?;
        Ok(client)
    }

    /// Deletes a client that has no campaigns left.
    pub async fn delete(&self, claims: &Claims, id: &str) -> Result<()> {
        require_admin(claims)?;
        self.get(claims, id).await?;

        let campaigns = self
            .db
            .count_campaigns_for_client(&claims.tenant, id)
            .await?;
        if campaigns > 0 {
            return Err(AppError::Conflict(format!(
                "Client {} still has {} campaign(s)",
                id, campaigns
            )));
        }

        if !self.db.delete_client(&claims.tenant, id).await? {
            return Err(AppError::NotFound(format!("Client {} not found", id)));
        }
        tracing::info!(client_id = %id, tenant = %claims.tenant, "Client deleted");
        Ok(())
    }
}

fn validated_email(email: Option<String>) -> Result<Option<String>> {
    match email {
        Some(e) if !e.contains('@') => Err(AppError::InvalidInput(format!(
            "Invalid contact email: {}",
            e
        ))),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{memory_db, same_tenant, tenant_with};
    use crate::types::Role;

    fn request(name: &str) -> CreateClientRequest {
        CreateClientRequest {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_blanks() {
        let db = memory_db().await;
        let admin = tenant_with(&db, Role::Admin).await;
        let service = ClientService::new(db);

        let client = service
            .create(
                &admin,
                CreateClientRequest {
                    name: "  Northwind ".to_string(),
                    notes: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(client.name, "Northwind");
        assert_eq!(client.notes, None);
        assert_eq!(service.get(&admin, &client.id).await.unwrap(), client);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = memory_db().await;
        let admin = tenant_with(&db, Role::Admin).await;
        let service = ClientService::new(db);

        let err = service.create(&admin, request(" ")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_viewer_cannot_write_and_manager_cannot_delete() {
        let db = memory_db().await;
        let admin = tenant_with(&db, Role::Admin).await;
        let service = ClientService::new(db);
        let client = service.create(&admin, request("Globex")).await.unwrap();

        let viewer = same_tenant(&admin, Role::Viewer);
        let err = service.create(&viewer, request("Nope")).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let manager = same_tenant(&admin, Role::Manager);
        let err = service.delete(&manager, &client.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        assert_eq!(service.list(&viewer).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_other_tenant_sees_not_found() {
        let db = memory_db().await;
        let admin = tenant_with(&db, Role::Admin).await;
        let intruder = tenant_with(&db, Role::Admin).await;
        let service = ClientService::new(db);
        let client = service.create(&admin, request("Initech")).await.unwrap();

        assert!(matches!(
            service.get(&intruder, &client.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(&intruder, &client.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(service.list(&intruder).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_update() {
        let db = memory_db().await;
        let admin = tenant_with(&db, Role::Admin).await;
        let service = ClientService::new(db);
        let client = service
            .create(
                &admin,
                CreateClientRequest {
                    name: "Umbrella".to_string(),
                    phone: Some("555-0100".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = service
            .update(
                &admin,
                &client.id,
                UpdateClientRequest {
                    phone: Some(String::new()),
                    contact_email: Some("ops@umbrella.test".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Umbrella");
        assert_eq!(updated.phone, None);
        assert_eq!(updated.contact_email.as_deref(), Some("ops@umbrella.test"));
    }
}
