//! Persisted entities of a tenant and the payloads that create and update them.
//!
//! Every entity carries the `tenant_id` of the organization that owns it. The
//! id is never accepted from request bodies; it always comes from the caller's
//! token claims.

use super::{AppError, Role};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Implements `as_str`, `Display` and `FromStr` for a lowercase string enum
/// stored as TEXT in the database.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(AppError::InvalidInput(format!(
                        "Unknown {}: {}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }
    };
}

// ============= Tenants & Users =============

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// User record from the database
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub tenant_id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User as exposed over the API (never carries the password hash).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    pub tenant_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            tenant_id: u.tenant_id,
            email: u.email,
            name: u.name,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

// ============= Clients =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Client {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateClientRequest {
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update; absent fields are left unchanged, empty strings clear
/// optional fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

// ============= Campaigns =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Completed,
    Archived,
}

text_enum!(CampaignStatus {
    Draft => "draft",
    Active => "active",
    Paused => "paused",
    Completed => "completed",
    Archived => "archived",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Campaign {
    pub id: String,
    pub tenant_id: String,
    pub client_id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: CampaignStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateCampaignRequest {
    pub client_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<CampaignStatus>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Partial campaign update. For the dates, an absent field keeps the stored
/// value and an explicit `null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCampaignRequest {
    pub client_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<CampaignStatus>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<Option<NaiveDate>>,
}

/// Reads a present field, keeping `null` as `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query filters for listing campaigns.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CampaignFilter {
    /// Only campaigns of this client
    pub client_id: Option<String>,
    /// Only campaigns in this status
    pub status: Option<CampaignStatus>,
}

/// Query filter for entities that hang off a campaign.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CampaignScope {
    /// Only entities of this campaign
    pub campaign_id: Option<String>,
}

// ============= Adverts =============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdvertChannel {
    Social,
    Search,
    Display,
    Video,
    Print,
    Radio,
    Outdoor,
    Email,
}

text_enum!(AdvertChannel {
    Social => "social",
    Search => "search",
    Display => "display",
    Video => "video",
    Print => "print",
    Radio => "radio",
    Outdoor => "outdoor",
    Email => "email",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdvertStatus {
    #[default]
    Draft,
    InReview,
    Approved,
    Live,
    Retired,
}

text_enum!(AdvertStatus {
    Draft => "draft",
    InReview => "in_review",
    Approved => "approved",
    Live => "live",
    Retired => "retired",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Advert {
    pub id: String,
    pub tenant_id: String,
    pub campaign_id: String,
    pub title: String,
    pub channel: AdvertChannel,
    pub content: Option<String>,
    pub status: AdvertStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAdvertRequest {
    pub campaign_id: String,
    pub title: String,
    pub channel: AdvertChannel,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub status: Option<AdvertStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAdvertRequest {
    pub title: Option<String>,
    pub channel: Option<AdvertChannel>,
    pub content: Option<String>,
    pub status: Option<AdvertStatus>,
}

// ============= Concept Notes =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConceptNote {
    pub id: String,
    pub tenant_id: String,
    pub campaign_id: String,
    pub title: String,
    pub body: String,
    /// User who wrote the note
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateConceptNoteRequest {
    pub campaign_id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateConceptNoteRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

// ============= Budgets =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Budget {
    pub id: String,
    pub tenant_id: String,
    pub campaign_id: String,
    pub category: String,
    /// Amount in minor currency units
    pub amount_cents: i64,
    /// ISO 4217 currency code
    pub currency: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBudgetRequest {
    pub campaign_id: String,
    pub category: String,
    pub amount_cents: i64,
    pub currency: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateBudgetRequest {
    pub category: Option<String>,
    pub amount_cents: Option<i64>,
    pub currency: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BudgetTotal {
    pub currency: String,
    pub amount_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BudgetSummary {
    pub campaign_id: String,
    /// One entry per currency, ordered by currency code
    pub totals: Vec<BudgetTotal>,
}

// ============= Dashboard =============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: CampaignStatus,
    pub count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub clients: i64,
    pub campaigns: i64,
    pub campaigns_by_status: Vec<StatusCount>,
    pub adverts: i64,
    pub concept_notes: i64,
    pub budgets: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_round_trip() {
        assert_eq!("in_review".parse::<AdvertStatus>().unwrap(), AdvertStatus::InReview);
        assert_eq!(AdvertStatus::InReview.as_str(), "in_review");
        assert_eq!("paused".parse::<CampaignStatus>().unwrap(), CampaignStatus::Paused);
        assert!("launched".parse::<CampaignStatus>().is_err());
    }

    #[test]
    fn test_serde_matches_stored_text() {
        let json = serde_json::to_string(&AdvertStatus::InReview).unwrap();
        assert_eq!(json, "\"in_review\"");
        let channel: AdvertChannel = serde_json::from_str("\"outdoor\"").unwrap();
        assert_eq!(channel, AdvertChannel::Outdoor);
    }

    #[test]
    fn test_update_campaign_dates_distinguish_null_from_absent() {
        let absent: UpdateCampaignRequest = serde_json::from_str(r#"{"name":"X"}"#).unwrap();
        assert_eq!(absent.start_date, None);
        assert_eq!(absent.end_date, None);

        let cleared: UpdateCampaignRequest =
            serde_json::from_str(r#"{"start_date":"2026-03-01","end_date":null}"#).unwrap();
        assert_eq!(cleared.start_date, Some(NaiveDate::from_ymd_opt(2026, 3, 1)));
        assert_eq!(cleared.end_date, Some(None));
    }
}

