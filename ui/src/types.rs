//! API types matching the campaign-desk server

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by `/api/auth/login` and `/api/auth/register`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Error body for every non-2xx response
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DashboardStats {
    pub clients: i64,
    pub campaigns: i64,
    pub campaigns_by_status: Vec<StatusCount>,
    pub adverts: i64,
    pub concept_notes: i64,
    pub budgets: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub status: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Advert {
    pub id: String,
    pub campaign_id: String,
    pub title: String,
    pub channel: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConceptNote {
    pub id: String,
    pub campaign_id: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Budget {
    pub id: String,
    pub campaign_id: String,
    pub category: String,
    pub amount_cents: i64,
    pub currency: String,
}

impl Budget {
    /// Formats the amount as major units, e.g. `1250.00 EUR`.
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();
        format!("{}{}.{:02} {}", sign, cents / 100, cents % 100, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_display_amount() {
        let budget = Budget {
            id: "b1".to_string(),
            campaign_id: "c1".to_string(),
            category: "Media".to_string(),
            amount_cents: 125_005,
            currency: "EUR".to_string(),
        };
        assert_eq!(budget.display_amount(), "1250.05 EUR");
    }

    #[test]
    fn test_campaign_ignores_extra_fields() {
        let json = r#"{"id":"k1","tenant_id":"t1","client_id":"c1","name":"Launch",
            "description":null,"status":"active","start_date":"2026-01-15","end_date":null,
            "created_at":"2026-01-01T00:00:00Z","updated_at":"2026-01-01T00:00:00Z"}"#;
        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(campaign.status, "active");
        assert_eq!(campaign.start_date.as_deref(), Some("2026-01-15"));
    }
}
