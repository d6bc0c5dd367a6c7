use crate::{
    auth::middleware::AuthUser,
    types::{DashboardStats, Result},
    AppState,
};
use axum::{extract::State, Json};

/// Counts of the caller's clients, campaigns and campaign content
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard counts", body = DashboardStats),
        (status = 401, description = "Unauthorized")
    ),
    tag = "dashboard",
    security(("bearer" = []))
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<DashboardStats>> {
    Ok(Json(state.dashboard().stats(&claims).await?))
}
