use crate::{
    auth::middleware::AuthUser,
    types::{
        CampaignScope, ConceptNote, CreateConceptNoteRequest, Result, UpdateConceptNoteRequest,
    },
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

/// List concept notes, optionally of one campaign
#[utoipa::path(
    get,
    path = "/api/concept-notes",
    params(CampaignScope),
    responses(
        (status = 200, description = "List of concept notes", body = Vec<ConceptNote>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "concept-notes",
    security(("bearer" = []))
)]
pub async fn list_concept_notes(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(scope): Query<CampaignScope>,
) -> Result<Json<Vec<ConceptNote>>> {
    Ok(Json(
        state
            .concept_notes()
            .list(&claims, scope.campaign_id.as_deref())
            .await?,
    ))
}

/// Write a concept note; the caller becomes its author
#[utoipa::path(
    post,
    path = "/api/concept-notes",
    request_body = CreateConceptNoteRequest,
    responses(
        (status = 201, description = "Concept note created", body = ConceptNote),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Role cannot modify records"),
        (status = 404, description = "Campaign not found")
    ),
    tag = "concept-notes",
    security(("bearer" = []))
)]
pub async fn create_concept_note(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateConceptNoteRequest>,
) -> Result<(StatusCode, Json<ConceptNote>)> {
    let note = state.concept_notes().create(&claims, payload).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// Get a concept note
#[utoipa::path(
    get,
    path = "/api/concept-notes/{id}",
    params(
        ("id" = String, Path, description = "Concept note ID")
    ),
    responses(
        (status = 200, description = "Concept note", body = ConceptNote),
        (status = 404, description = "Concept note not found")
    ),
    tag = "concept-notes",
    security(("bearer" = []))
)]
pub async fn get_concept_note(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ConceptNote>> {
    Ok(Json(state.concept_notes().get(&claims, &id).await?))
}

/// Update a concept note
#[utoipa::path(
    put,
    path = "/api/concept-notes/{id}",
    params(
        ("id" = String, Path, description = "Concept note ID")
    ),
    request_body = UpdateConceptNoteRequest,
    responses(
        (status = 200, description = "Concept note updated", body = ConceptNote),
        (status = 403, description = "Role cannot modify records"),
        (status = 404, description = "Concept note not found")
    ),
    tag = "concept-notes",
    security(("bearer" = []))
)]
pub async fn update_concept_note(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateConceptNoteRequest>,
) -> Result<Json<ConceptNote>> {
    Ok(Json(
        state.concept_notes().update(&claims, &id, payload).await?,
    ))
}

/// Delete a concept note (admin only)
#[utoipa::path(
    delete,
    path = "/api/concept-notes/{id}",
    params(
        ("id" = String, Path, description = "Concept note ID")
    ),
    responses(
        (status = 204, description = "Concept note deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Concept note not found")
    ),
    tag = "concept-notes",
    security(("bearer" = []))
)]
pub async fn delete_concept_note(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.concept_notes().delete(&claims, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
