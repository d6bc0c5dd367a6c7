use crate::{
    auth::middleware::AuthUser,
    types::{Advert, CampaignScope, CreateAdvertRequest, Result, UpdateAdvertRequest},
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

/// List adverts, optionally of one campaign
#[utoipa::path(
    get,
    path = "/api/adverts",
    params(CampaignScope),
    responses(
        (status = 200, description = "List of adverts", body = Vec<Advert>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "adverts",
    security(("bearer" = []))
)]
pub async fn list_adverts(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(scope): Query<CampaignScope>,
) -> Result<Json<Vec<Advert>>> {
    Ok(Json(
        state
            .adverts()
            .list(&claims, scope.campaign_id.as_deref())
            .await?,
    ))
}

/// Create an advert
#[utoipa::path(
    post,
    path = "/api/adverts",
    request_body = CreateAdvertRequest,
    responses(
        (status = 201, description = "Advert created", body = Advert),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Role cannot modify records"),
        (status = 404, description = "Campaign not found")
    ),
    tag = "adverts",
    security(("bearer" = []))
)]
pub async fn create_advert(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateAdvertRequest>,
) -> Result<(StatusCode, Json<Advert>)> {
    let advert = state.adverts().create(&claims, payload).await?;
    Ok((StatusCode::CREATED, Json(advert)))
}

/// Get an advert
#[utoipa::path(
    get,
    path = "/api/adverts/{id}",
    params(
        ("id" = String, Path, description = "Advert ID")
    ),
    responses(
        (status = 200, description = "Advert details", body = Advert),
        (status = 404, description = "Advert not found")
    ),
    tag = "adverts",
    security(("bearer" = []))
)]
pub async fn get_advert(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Advert>> {
    Ok(Json(state.adverts().get(&claims, &id).await?))
}

/// Update an advert
#[utoipa::path(
    put,
    path = "/api/adverts/{id}",
    params(
        ("id" = String, Path, description = "Advert ID")
    ),
    request_body = UpdateAdvertRequest,
    responses(
        (status = 200, description = "Advert updated", body = Advert),
        (status = 403, description = "Role cannot modify records"),
        (status = 404, description = "Advert not found")
    ),
    tag = "adverts",
    security(("bearer" = []))
)]
pub async fn update_advert(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAdvertRequest>,
) -> Result<Json<Advert>> {
    Ok(Json(state.adverts().update(&claims, &id, payload).await?))
}

/// Delete an advert (admin only)
#[utoipa::path(
    delete,
    path = "/api/adverts/{id}",
    params(
        ("id" = String, Path, description = "Advert ID")
    ),
    responses(
        (status = 204, description = "Advert deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Advert not found")
    ),
    tag = "adverts",
    security(("bearer" = []))
)]
pub async fn delete_advert(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.adverts().delete(&claims, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
