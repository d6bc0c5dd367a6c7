use crate::db::DatabaseClient;
use crate::types::{Claims, DashboardStats, Result};
use std::sync::Arc;

/// Per-tenant counts shown on the dashboard.
pub struct DashboardService {
    db: Arc<dyn DatabaseClient>,
}

impl DashboardService {
    pub fn new(db: Arc<dyn DatabaseClient>) -> Self {
        Self { db }
    }

    pub async fn stats(&self, claims: &Claims) -> Result<DashboardStats> {
        self.db.dashboard_stats(&claims.tenant).await
    }
}
