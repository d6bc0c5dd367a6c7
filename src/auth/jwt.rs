use crate::types::{AppError, Claims, IdentityClaims, Result};
use crate::utils::toml_config::ResolvedAuth;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Issues and validates signed bearer tokens.
///
/// Tokens are HS256 JWTs carrying the subject, identity claims, issuer,
/// audience, issued-at and expiry. They are stateless: validity is decided
/// purely by signature, issuer, audience and expiry, with no clock-skew
/// allowance. There is no revocation list.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    access_expiry: i64,
}

impl TokenService {
    /// Creates a new TokenService.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing key (validated to be at least 32 bytes at config load)
    /// * `issuer` - Value written to and required in the `iss` claim
    /// * `audience` - Value written to and required in the `aud` claim
    /// * `access_expiry` - Token validity in seconds
    pub fn new(secret: &str, issuer: &str, audience: &str, access_expiry: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            access_expiry,
        }
    }

    pub fn from_config(auth: &ResolvedAuth) -> Self {
        Self::new(
            &auth.secret,
            &auth.issuer,
            &auth.audience,
            auth.access_expiry,
        )
    }

    /// Token validity in seconds.
    pub fn access_expiry(&self) -> i64 {
        self.access_expiry
    }

    /// Issues a signed token for `user_id` carrying the given identity claims.
    pub fn issue(&self, user_id: &str, identity: IdentityClaims) -> Result<String> {
        let now = Utc::now();
        let expires_at = Duration::try_seconds(self.access_expiry)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Token lifetime of {}s is out of range",
                    self.access_expiry
                ))
            })?;
        let claims = Claims {
            sub: user_id.to_string(),
            email: identity.email,
            role: identity.role,
            tenant: identity.tenant,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token and returns its claims.
    ///
    /// Every failure (bad signature, wrong issuer or audience, expired,
    /// malformed) is reported as [`AppError::InvalidToken`].
    pub fn validate(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AppError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    const SECRET: &str = "test-secret-key-that-is-at-least-32-chars";
    const ISSUER: &str = "campaign-desk";
    const AUDIENCE: &str = "campaign-desk-web";

    fn create_test_service() -> TokenService {
        TokenService::new(SECRET, ISSUER, AUDIENCE, 900)
    }

    fn identity() -> IdentityClaims {
        IdentityClaims {
            email: "planner@agency.test".to_string(),
            role: Role::Manager,
            tenant: "tenant-1".to_string(),
        }
    }

    fn sign_raw(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("should encode")
    }

    fn valid_claims() -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: "user-1".to_string(),
            email: "planner@agency.test".to_string(),
            role: Role::Admin,
            tenant: "tenant-1".to_string(),
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
            iat: now,
            exp: now + 600,
        }
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let service = create_test_service();

        let token = service.issue("user-123", identity()).expect("should issue");
        let claims = service.validate(&token).expect("should validate");

        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.email, "planner@agency.test");
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.tenant, "tenant-1");
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.aud, AUDIENCE);
    }

    #[test]
    fn test_validate_returns_embedded_claims_unchanged() {
        let service = create_test_service();
        let claims = valid_claims();

        let token = sign_raw(&claims, SECRET);

        assert_eq!(service.validate(&token).expect("should validate"), claims);
    }

    #[test]
    fn test_expiry_matches_configuration() {
        let service = create_test_service();
        let token = service.issue("user", identity()).expect("should issue");
        let claims = service.validate(&token).expect("should validate");

        let now = Utc::now().timestamp();
        assert!(claims.iat <= now && claims.iat >= now - 5);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_altered_signature_rejected() {
        let service = create_test_service();
        let token = service.issue("user", identity()).expect("should issue");

        let (head, signature) = token.rsplit_once('.').expect("three segments");
        let first = signature.chars().next().expect("non-empty signature");
        let replacement = if first == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}{}", head, replacement, &signature[1..]);

        assert!(matches!(
            service.validate(&tampered),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = create_test_service();
        let token = sign_raw(&valid_claims(), "another-secret-that-is-32-chars-long!");

        assert!(matches!(service.validate(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let service = create_test_service();
        let mut claims = valid_claims();
        claims.iss = "someone-else".to_string();

        assert!(matches!(
            service.validate(&sign_raw(&claims, SECRET)),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let service = create_test_service();
        let mut claims = valid_claims();
        claims.aud = "mobile-app".to_string();

        assert!(matches!(
            service.validate(&sign_raw(&claims, SECRET)),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected_without_grace() {
        let service = create_test_service();
        let mut claims = valid_claims();
        claims.iat -= 120;
        claims.exp = Utc::now().timestamp() - 1;

        assert!(matches!(
            service.validate(&sign_raw(&claims, SECRET)),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        let service = TokenService::new(SECRET, ISSUER, AUDIENCE, 100_000_000_000_000_000);

        assert!(matches!(
            service.issue("user", identity()),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let service = create_test_service();

        assert!(matches!(
            service.validate("invalid.token.here"),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(service.validate(""), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let service = create_test_service();
        let token = encode(
            &Header::new(Algorithm::HS512),
            &valid_claims(),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("should encode");

        assert!(matches!(service.validate(&token), Err(AppError::InvalidToken)));
    }
}
