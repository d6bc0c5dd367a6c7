use crate::{
    auth::middleware::AuthUser,
    types::{CreateUserRequest, Result, UserProfile},
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};

/// List users of the caller's organization
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users of the tenant", body = Vec<UserProfile>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<UserProfile>>> {
    Ok(Json(state.auth_service.list_users(&claims).await?))
}

/// Add a user to the caller's organization (admin only)
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserProfile),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "User already exists")
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    let user = state.auth_service.create_member(&claims, &payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
