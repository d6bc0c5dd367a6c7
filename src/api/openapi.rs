use crate::api::handlers;
use crate::types::*;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI document for the whole REST surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campaign Desk API",
        description = "Multi-tenant campaign management"
    ),
    paths(
        handlers::health::health_check,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::dashboard::get_dashboard,
        handlers::clients::list_clients,
        handlers::clients::create_client,
        handlers::clients::get_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,
        handlers::campaigns::list_campaigns,
        handlers::campaigns::create_campaign,
        handlers::campaigns::get_campaign,
        handlers::campaigns::update_campaign,
        handlers::campaigns::delete_campaign,
        handlers::campaigns::budget_summary,
        handlers::adverts::list_adverts,
        handlers::adverts::create_advert,
        handlers::adverts::get_advert,
        handlers::adverts::update_advert,
        handlers::adverts::delete_advert,
        handlers::concept_notes::list_concept_notes,
        handlers::concept_notes::create_concept_note,
        handlers::concept_notes::get_concept_note,
        handlers::concept_notes::update_concept_note,
        handlers::concept_notes::delete_concept_note,
        handlers::budgets::list_budgets,
        handlers::budgets::create_budget,
        handlers::budgets::get_budget,
        handlers::budgets::update_budget,
        handlers::budgets::delete_budget,
    ),
    components(schemas(
        HealthResponse,
        LoginRequest,
        RegisterRequest,
        CreateUserRequest,
        TokenResponse,
        Role,
        UserProfile,
        Client,
        CreateClientRequest,
        UpdateClientRequest,
        CampaignStatus,
        Campaign,
        CreateCampaignRequest,
        UpdateCampaignRequest,
        AdvertChannel,
        AdvertStatus,
        Advert,
        CreateAdvertRequest,
        UpdateAdvertRequest,
        ConceptNote,
        CreateConceptNoteRequest,
        UpdateConceptNoteRequest,
        Budget,
        CreateBudgetRequest,
        UpdateBudgetRequest,
        BudgetTotal,
        BudgetSummary,
        StatusCount,
        DashboardStats,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Login and registration"),
        (name = "users", description = "Members of an organization"),
        (name = "health", description = "Liveness"),
        (name = "dashboard", description = "Per-organization counts"),
        (name = "clients", description = "Advertisers"),
        (name = "campaigns", description = "Campaigns of a client"),
        (name = "adverts", description = "Adverts of a campaign"),
        (name = "concept-notes", description = "Creative notes of a campaign"),
        (name = "budgets", description = "Budget lines of a campaign"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
