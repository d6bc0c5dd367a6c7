//! Client-side session: token persistence and expiry checks
//!
//! The token lives behind a [`TokenStorage`] so the same session logic runs
//! against browser storage in the app and an in-memory store in tests.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use gloo_storage::{LocalStorage, SessionStorage, Storage};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "campaign_desk_token";

/// Where the bearer token is kept between page loads.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Keeps the token for the lifetime of the page only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    token: Arc<Mutex<Option<String>>>,
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

/// `window.localStorage`, survives browser restarts.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTokenStorage;

impl TokenStorage for LocalTokenStorage {
    fn load(&self) -> Option<String> {
        LocalStorage::get(TOKEN_KEY).ok()
    }

    fn save(&self, token: &str) {
        if let Err(e) = LocalStorage::set(TOKEN_KEY, token) {
            tracing::warn!("Failed to persist token: {}", e);
        }
    }

    fn clear(&self) {
        LocalStorage::delete(TOKEN_KEY);
    }
}

/// `window.sessionStorage`, cleared when the tab closes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionTokenStorage;

impl TokenStorage for SessionTokenStorage {
    fn load(&self) -> Option<String> {
        SessionStorage::get(TOKEN_KEY).ok()
    }

    fn save(&self, token: &str) {
        if let Err(e) = SessionStorage::set(TOKEN_KEY, token) {
            tracing::warn!("Failed to persist token: {}", e);
        }
    }

    fn clear(&self) {
        SessionStorage::delete(TOKEN_KEY);
    }
}

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: i64,
}

/// Reads the `exp` claim from a JWT without verifying the signature.
///
/// Verification is the server's job; the client only needs to know when to
/// stop presenting the token.
pub fn token_expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice::<ExpiryClaim>(&bytes)
        .ok()
        .map(|claim| claim.exp)
}

/// True when the token carries an `exp` that is still in the future.
pub fn is_token_live(token: &str, now: i64) -> bool {
    token_expiry(token).is_some_and(|exp| exp > now)
}

/// Token persistence plus the derived authenticated flag.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn TokenStorage>,
}

impl Session {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }

    pub fn token(&self) -> Option<String> {
        self.storage.load()
    }

    pub fn store(&self, token: &str) {
        self.storage.save(token);
    }

    pub fn clear(&self) {
        self.storage.clear();
    }

    /// Re-derives the session. An absent, malformed or expired token is
    /// removed from storage and `None` is returned.
    pub fn check(&self, now: i64) -> Option<String> {
        match self.storage.load() {
            Some(token) if is_token_live(&token, now) => Some(token),
            Some(_) => {
                self.storage.clear();
                None
            }
            None => None,
        }
    }

    pub fn is_authenticated(&self, now: i64) -> bool {
        self.check(now).is_some()
    }
}

/// Guards a request so only one can be pending at a time.
#[derive(Debug, Default, Clone)]
pub struct InFlight {
    active: Arc<AtomicBool>,
}

impl InFlight {
    /// Claims the flag, or returns `None` while another request holds it.
    pub fn try_begin(&self) -> Option<InFlightGuard> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                active: self.active.clone(),
            })
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Releases the [`InFlight`] flag on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    active: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_760_000_000;

    fn jwt_with(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    fn jwt_expiring_at(exp: i64) -> String {
        jwt_with(&format!(r#"{{"sub":"u1","exp":{}}}"#, exp))
    }

    #[test]
    fn test_token_expiry_reads_exp_claim() {
        assert_eq!(token_expiry(&jwt_expiring_at(NOW + 60)), Some(NOW + 60));
        assert_eq!(token_expiry("not-a-jwt"), None);
        assert_eq!(token_expiry(&jwt_with(r#"{"sub":"u1"}"#)), None);
        assert_eq!(token_expiry("a.%%%.c"), None);
    }

    #[test]
    fn test_live_token_keeps_session() {
        let session = Session::in_memory();
        let token = jwt_expiring_at(NOW + 60);
        session.store(&token);

        assert!(session.is_authenticated(NOW));
        assert_eq!(session.check(NOW), Some(token));
    }

    #[test]
    fn test_expired_token_is_cleared() {
        let session = Session::in_memory();
        session.store(&jwt_expiring_at(NOW));

        assert!(!session.is_authenticated(NOW));
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_malformed_token_is_cleared() {
        let session = Session::in_memory();
        session.store("garbage");

        assert_eq!(session.check(NOW), None);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_clear_logs_out() {
        let session = Session::in_memory();
        session.store(&jwt_expiring_at(NOW + 60));
        session.clear();

        assert!(!session.is_authenticated(NOW));
    }

    #[test]
    fn test_in_flight_rejects_second_submit() {
        let flag = InFlight::default();

        let first = flag.try_begin();
        assert!(first.is_some());
        assert!(flag.is_active());
        assert!(flag.try_begin().is_none());

        drop(first);
        assert!(!flag.is_active());
        assert!(flag.try_begin().is_some());
    }
}
