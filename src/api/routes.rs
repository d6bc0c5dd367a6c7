use crate::api::handlers;
use crate::auth::TokenService;
use crate::types::{AppError, Result};
use crate::utils::toml_config::CorsConfig;
use crate::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Routes mounted under `/api`.
pub fn create_router(token_service: Arc<TokenService>) -> Router<AppState> {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login));

    let protected_routes = Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        // Clients
        .route(
            "/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/clients/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        // Campaigns
        .route(
            "/campaigns",
            get(handlers::campaigns::list_campaigns).post(handlers::campaigns::create_campaign),
        )
        .route(
            "/campaigns/{id}",
            get(handlers::campaigns::get_campaign)
                .put(handlers::campaigns::update_campaign)
                .delete(handlers::campaigns::delete_campaign),
        )
        .route(
            "/campaigns/{id}/budget-summary",
            get(handlers::campaigns::budget_summary),
        )
        // Campaign content
        .route(
            "/adverts",
            get(handlers::adverts::list_adverts).post(handlers::adverts::create_advert),
        )
        .route(
            "/adverts/{id}",
            get(handlers::adverts::get_advert)
                .put(handlers::adverts::update_advert)
                .delete(handlers::adverts::delete_advert),
        )
        .route(
            "/concept-notes",
            get(handlers::concept_notes::list_concept_notes)
                .post(handlers::concept_notes::create_concept_note),
        )
        .route(
            "/concept-notes/{id}",
            get(handlers::concept_notes::get_concept_note)
                .put(handlers::concept_notes::update_concept_note)
                .delete(handlers::concept_notes::delete_concept_note),
        )
        .route(
            "/budgets",
            get(handlers::budgets::list_budgets).post(handlers::budgets::create_budget),
        )
        .route(
            "/budgets/{id}",
            get(handlers::budgets::get_budget)
                .put(handlers::budgets::update_budget)
                .delete(handlers::budgets::delete_budget),
        )
        .layer(middleware::from_fn(move |req, next| {
            crate::auth::middleware::auth_middleware(token_service.clone(), req, next)
        }));

    public_routes.merge(protected_routes)
}

/// The complete application: health, API, docs, CORS and tracing.
pub fn create_app(state: AppState) -> Result<Router> {
    let cors = cors_layer(&state.config.cors)?;

    let router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", create_router(state.token_service.clone()))
        .with_state(state);

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", crate::api::openapi::ApiDoc::openapi()),
        )
    };

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route("/api-docs/openapi.json", get(openapi_json));

    #[cfg(feature = "ui")]
    let router = router.fallback(crate::api::ui::serve_ui);

    Ok(router
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

#[cfg(not(feature = "swagger-ui"))]
async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    use utoipa::OpenApi;
    axum::Json(crate::api::openapi::ApiDoc::openapi())
}

/// Allow-listed origins with credentials; never a wildcard.
pub fn cors_layer(cors: &CorsConfig) -> Result<CorsLayer> {
    let origins = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| AppError::Internal(format!("Invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
}
