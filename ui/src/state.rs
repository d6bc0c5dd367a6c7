//! Global application state

use crate::session::{InFlight, LocalTokenStorage, Session, TokenStorage};
use leptos::prelude::*;
use std::sync::Arc;

/// Provided through context at the app root.
#[derive(Clone)]
pub struct AppState {
    pub session: Session,
    /// Current bearer token; `None` renders the login screen
    pub token: RwSignal<Option<String>>,
    /// Set while a login request is pending
    pub login_in_flight: InFlight,
    /// Prefix for API calls; empty means same origin
    pub api_base: RwSignal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_storage(Arc::new(LocalTokenStorage))
    }

    pub fn with_storage(storage: Arc<dyn TokenStorage>) -> Self {
        let session = Session::new(storage);
        let token = session.check(now());

        Self {
            session,
            token: RwSignal::new(token),
            login_in_flight: InFlight::default(),
            api_base: RwSignal::new(String::new()),
        }
    }

    pub fn sign_in(&self, token: &str) {
        self.session.store(token);
        self.token.set(Some(token.to_string()));
    }

    pub fn sign_out(&self) {
        self.session.clear();
        self.token.set(None);
    }

    /// Re-reads storage and drops the token once it has expired.
    pub fn refresh_session(&self) {
        let token = self.session.check(now());
        if token != self.token.get_untracked() {
            self.token.set(token);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStorage, TokenStorage};
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    fn jwt_expiring_at(exp: i64) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"u1","exp":{}}}"#, exp))
        )
    }

    fn state_with(storage: &MemoryStorage) -> AppState {
        AppState::with_storage(Arc::new(storage.clone()))
    }

    #[test]
    fn test_sign_in_persists_and_sets_signal() {
        let owner = Owner::new();
        owner.set();
        let storage = MemoryStorage::default();
        let state = state_with(&storage);
        assert_eq!(state.token.get_untracked(), None);

        let token = jwt_expiring_at(now() + 3600);
        state.sign_in(&token);

        assert_eq!(state.token.get_untracked(), Some(token.clone()));
        assert_eq!(storage.load(), Some(token));
    }

    #[test]
    fn test_sign_out_clears_storage_and_signal() {
        let owner = Owner::new();
        owner.set();
        let storage = MemoryStorage::default();
        let state = state_with(&storage);
        state.sign_in(&jwt_expiring_at(now() + 3600));

        state.sign_out();

        assert_eq!(state.token.get_untracked(), None);
        assert_eq!(storage.load(), None);
    }

    #[test]
    fn test_stored_live_token_restores_session() {
        let owner = Owner::new();
        owner.set();
        let storage = MemoryStorage::default();
        let token = jwt_expiring_at(now() + 3600);
        storage.save(&token);

        let state = state_with(&storage);
        assert_eq!(state.token.get_untracked(), Some(token));
    }

    #[test]
    fn test_refresh_drops_expired_token() {
        let owner = Owner::new();
        owner.set();
        let storage = MemoryStorage::default();
        let state = state_with(&storage);
        state.sign_in(&jwt_expiring_at(now() + 3600));

        // Expires while the page is open
        storage.save(&jwt_expiring_at(now() - 1));
        state.refresh_session();

        assert_eq!(state.token.get_untracked(), None);
        assert_eq!(storage.load(), None);
    }

    #[test]
    fn test_refresh_signs_out_when_storage_is_emptied() {
        let owner = Owner::new();
        owner.set();
        let storage = MemoryStorage::default();
        let state = state_with(&storage);
        state.sign_in(&jwt_expiring_at(now() + 3600));

        storage.clear();
        state.refresh_session();

        assert_eq!(state.token.get_untracked(), None);
    }

    #[test]
    fn test_refresh_picks_up_token_from_storage() {
        let owner = Owner::new();
        owner.set();
        let storage = MemoryStorage::default();
        let state = state_with(&storage);
        let token = jwt_expiring_at(now() + 3600);

        storage.save(&token);
        state.refresh_session();
        assert_eq!(state.token.get_untracked(), Some(token.clone()));

        // Unchanged token leaves the signal alone
        state.refresh_session();
        assert_eq!(state.token.get_untracked(), Some(token));
    }
}
