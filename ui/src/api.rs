//! API client for the campaign-desk server

use crate::state::AppState;
use crate::types::*;
use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401 from the server; the session is no longer usable
    Unauthorized,
    Status(u16, String),
    Network(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Your session has expired"),
            ApiError::Status(_, message) => write!(f, "{}", message),
            ApiError::Network(e) => write!(f, "Network error: {}", e),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

fn authorized(req: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(t) => req.header("Authorization", &format!("Bearer {}", t)),
        None => req,
    }
}

async fn read<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
    let status = resp.status();
    if status == 401 {
        return Err(ApiError::Unauthorized);
    }
    if !resp.ok() {
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("Request failed with status {}", status),
        };
        return Err(ApiError::Status(status, message));
    }

    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Network(format!("Failed to parse response: {}", e)))
}

async fn get<T: DeserializeOwned>(url: &str, token: &str) -> ApiResult<T> {
    let resp = authorized(Request::get(url), Some(token))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read(resp).await
}

pub async fn login(base: &str, email: &str, password: &str) -> ApiResult<TokenResponse> {
    let body = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let resp = Request::post(&format!("{}/api/auth/login", base))
        .json(&body)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read(resp).await
}

pub async fn fetch_me(base: &str, token: &str) -> ApiResult<UserProfile> {
    get(&format!("{}/api/auth/me", base), token).await
}

pub async fn fetch_dashboard(base: &str, token: &str) -> ApiResult<DashboardStats> {
    get(&format!("{}/api/dashboard", base), token).await
}

pub async fn fetch_clients(base: &str, token: &str) -> ApiResult<Vec<Client>> {
    get(&format!("{}/api/clients", base), token).await
}

/// Lists campaigns, optionally narrowed to one status.
pub async fn fetch_campaigns(
    base: &str,
    token: &str,
    status: Option<&str>,
) -> ApiResult<Vec<Campaign>> {
    let url = match status {
        Some(s) => format!("{}/api/campaigns?status={}", base, s),
        None => format!("{}/api/campaigns", base),
    };
    get(&url, token).await
}

pub async fn fetch_adverts(base: &str, token: &str) -> ApiResult<Vec<Advert>> {
    get(&format!("{}/api/adverts", base), token).await
}

pub async fn fetch_concept_notes(base: &str, token: &str) -> ApiResult<Vec<ConceptNote>> {
    get(&format!("{}/api/concept-notes", base), token).await
}

pub async fn fetch_budgets(base: &str, token: &str) -> ApiResult<Vec<Budget>> {
    get(&format!("{}/api/budgets", base), token).await
}

/// Runs `fetch` with the current token and stores the outcome in `target`.
/// A 401 signs the user out.
pub fn load_into<T, F, Fut>(state: &AppState, target: RwSignal<Option<ApiResult<T>>>, fetch: F)
where
    T: Send + Sync + 'static,
    F: FnOnce(String, String) -> Fut + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    let Some(token) = state.token.get_untracked() else {
        return;
    };
    let base = state.api_base.get_untracked();
    let state = state.clone();

    spawn_local(async move {
        let result = fetch(base, token).await;
        if let Err(ApiError::Unauthorized) = result {
            state.sign_out();
        } else if let Err(ref e) = result {
            tracing::error!("API request failed: {}", e);
        }
        target.set(Some(result));
    });
}
