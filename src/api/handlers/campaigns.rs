//! Campaign CRUD handlers and the per-campaign budget summary.

use crate::{
    auth::middleware::AuthUser,
    types::{
        BudgetSummary, Campaign, CampaignFilter, CreateCampaignRequest, Result,
        UpdateCampaignRequest,
    },
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

/// List campaigns, optionally filtered by client and status
#[utoipa::path(
    get,
    path = "/api/campaigns",
    params(CampaignFilter),
    responses(
        (status = 200, description = "List of campaigns", body = Vec<Campaign>),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "campaigns",
    security(("bearer" = []))
)]
pub async fn list_campaigns(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(filter): Query<CampaignFilter>,
) -> Result<Json<Vec<Campaign>>> {
    Ok(Json(state.campaigns().list(&claims, &filter).await?))
}

/// Create a campaign for one of the caller's clients
#[utoipa::path(
    post,
    path = "/api/campaigns",
    request_body = CreateCampaignRequest,
    responses(
        (status = 201, description = "Campaign created", body = Campaign),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Role cannot modify records"),
        (status = 404, description = "Client not found")
    ),
    tag = "campaigns",
    security(("bearer" = []))
)]
pub async fn create_campaign(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<Campaign>)> {
    let campaign = state.campaigns().create(&claims, payload).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

/// Get a campaign
#[utoipa::path(
    get,
    path = "/api/campaigns/{id}",
    params(
        ("id" = String, Path, description = "Campaign ID")
    ),
    responses(
        (status = 200, description = "Campaign details", body = Campaign),
        (status = 404, description = "Campaign not found")
    ),
    tag = "campaigns",
    security(("bearer" = []))
)]
pub async fn get_campaign(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Campaign>> {
    Ok(Json(state.campaigns().get(&claims, &id).await?))
}

/// Update a campaign; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/campaigns/{id}",
    params(
        ("id" = String, Path, description = "Campaign ID")
    ),
    request_body = UpdateCampaignRequest,
    responses(
        (status = 200, description = "Campaign updated", body = Campaign),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Role cannot modify records"),
        (status = 404, description = "Campaign or client not found")
    ),
    tag = "campaigns",
    security(("bearer" = []))
)]
pub async fn update_campaign(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCampaignRequest>,
) -> Result<Json<Campaign>> {
    Ok(Json(state.campaigns().update(&claims, &id, payload).await?))
}

/// Delete a campaign with its adverts, concept notes and budgets (admin only)
#[utoipa::path(
    delete,
    path = "/api/campaigns/{id}",
    params(
        ("id" = String, Path, description = "Campaign ID")
    ),
    responses(
        (status = 204, description = "Campaign deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Campaign not found")
    ),
    tag = "campaigns",
    security(("bearer" = []))
)]
pub async fn delete_campaign(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.campaigns().delete(&claims, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Budget totals of a campaign, one per currency
#[utoipa::path(
    get,
    path = "/api/campaigns/{id}/budget-summary",
    params(
        ("id" = String, Path, description = "Campaign ID")
    ),
    responses(
        (status = 200, description = "Budget totals", body = BudgetSummary),
        (status = 404, description = "Campaign not found")
    ),
    tag = "campaigns",
    security(("bearer" = []))
)]
pub async fn budget_summary(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<BudgetSummary>> {
    Ok(Json(state.campaigns().budget_summary(&claims, &id).await?))
}
