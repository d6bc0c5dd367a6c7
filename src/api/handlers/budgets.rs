use crate::{
    auth::middleware::AuthUser,
    types::{Budget, CampaignScope, CreateBudgetRequest, Result, UpdateBudgetRequest},
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

/// List budget lines, optionally of one campaign
#[utoipa::path(
    get,
    path = "/api/budgets",
    params(CampaignScope),
    responses(
        (status = 200, description = "List of budget lines", body = Vec<Budget>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "budgets",
    security(("bearer" = []))
)]
pub async fn list_budgets(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(scope): Query<CampaignScope>,
) -> Result<Json<Vec<Budget>>> {
    Ok(Json(
        state
            .budgets()
            .list(&claims, scope.campaign_id.as_deref())
            .await?,
    ))
}

/// Create a budget line
#[utoipa::path(
    post,
    path = "/api/budgets",
    request_body = CreateBudgetRequest,
    responses(
        (status = 201, description = "Budget line created", body = Budget),
        (status = 400, description = "Negative amount or bad currency code"),
        (status = 403, description = "Role cannot modify records"),
        (status = 404, description = "Campaign not found")
    ),
    tag = "budgets",
    security(("bearer" = []))
)]
pub async fn create_budget(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateBudgetRequest>,
) -> Result<(StatusCode, Json<Budget>)> {
    let budget = state.budgets().create(&claims, payload).await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

/// Get a budget line
#[utoipa::path(
    get,
    path = "/api/budgets/{id}",
    params(
        ("id" = String, Path, description = "Budget ID")
    ),
    responses(
        (status = 200, description = "Budget line", body = Budget),
        (status = 404, description = "Budget not found")
    ),
    tag = "budgets",
    security(("bearer" = []))
)]
pub async fn get_budget(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Budget>> {
    Ok(Json(state.budgets().get(&claims, &id).await?))
}

/// Update a budget line
#[utoipa::path(
    put,
    path = "/api/budgets/{id}",
    params(
        ("id" = String, Path, description = "Budget ID")
    ),
    request_body = UpdateBudgetRequest,
    responses(
        (status = 200, description = "Budget line updated", body = Budget),
        (status = 400, description = "Negative amount or bad currency code"),
        (status = 403, description = "Role cannot modify records"),
        (status = 404, description = "Budget not found")
    ),
    tag = "budgets",
    security(("bearer" = []))
)]
pub async fn update_budget(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBudgetRequest>,
) -> Result<Json<Budget>> {
    Ok(Json(state.budgets().update(&claims, &id, payload).await?))
}

/// Delete a budget line (admin only)
#[utoipa::path(
    delete,
    path = "/api/budgets/{id}",
    params(
        ("id" = String, Path, description = "Budget ID")
    ),
    responses(
        (status = 204, description = "Budget line deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Budget not found")
    ),
    tag = "budgets",
    security(("bearer" = []))
)]
pub async fn delete_budget(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.budgets().delete(&claims, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
