//! Client CRUD handlers.

use crate::{
    auth::middleware::AuthUser,
    types::{Client, CreateClientRequest, Result, UpdateClientRequest},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// List clients of the caller's organization
#[utoipa::path(
    get,
    path = "/api/clients",
    responses(
        (status = 200, description = "List of clients", body = Vec<Client>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "clients",
    security(("bearer" = []))
)]
pub async fn list_clients(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<Client>>> {
    Ok(Json(state.clients().list(&claims).await?))
}

/// Create a client
#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Role cannot modify records")
    ),
    tag = "clients",
    security(("bearer" = []))
)]
pub async fn create_client(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>)> {
    let client = state.clients().create(&claims, payload).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Get a client
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    params(
        ("id" = String, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Client details", body = Client),
        (status = 404, description = "Client not found")
    ),
    tag = "clients",
    security(("bearer" = []))
)]
pub async fn get_client(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Client>> {
    Ok(Json(state.clients().get(&claims, &id).await?))
}

/// Update a client; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    params(
        ("id" = String, Path, description = "Client ID")
    ),
    request_body = UpdateClientRequest,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 403, description = "Role cannot modify records"),
        (status = 404, description = "Client not found")
    ),
    tag = "clients",
    security(("bearer" = []))
)]
pub async fn update_client(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateClientRequest>,
) -> Result<Json<Client>> {
    Ok(Json(state.clients().update(&claims, &id, payload).await?))
}

/// Delete a client without campaigns (admin only)
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    params(
        ("id" = String, Path, description = "Client ID")
    ),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Client not found"),
        (status = 409, description = "Client still has campaigns")
    ),
    tag = "clients",
    security(("bearer" = []))
)]
pub async fn delete_client(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.clients().delete(&claims, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
