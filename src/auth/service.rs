use crate::auth::jwt::TokenService;
use crate::auth::password::{hash_password, verify_password};
use crate::db::DatabaseClient;
use crate::services::{new_id, non_empty, now, require_admin};
use crate::types::{
    AppError, Claims, CreateUserRequest, IdentityClaims, LoginRequest, RegisterRequest, Result,
    Role, Tenant, TokenResponse, User, UserProfile,
};
use std::sync::Arc;

const MIN_PASSWORD_LEN: usize = 8;

/// Credential checks and account management on top of the [`TokenService`].
pub struct AuthService {
    db: Arc<dyn DatabaseClient>,
    tokens: Arc<TokenService>,
    /// Verified against when the email is unknown so both failure paths
    /// cost one Argon2 verification.
    dummy_hash: String,
}

impl AuthService {
    pub fn new(db: Arc<dyn DatabaseClient>, tokens: Arc<TokenService>) -> Result<Self> {
        Ok(Self {
            db,
            tokens,
            dummy_hash: hash_password("campaign-desk-dummy-password")?,
        })
    }

    /// Verifies credentials and issues a bearer token.
    ///
    /// Unknown email and wrong password both yield
    /// [`AppError::InvalidCredentials`].
    pub async fn login(&self, req: &LoginRequest) -> Result<TokenResponse> {
        let email = normalize_email(&req.email);
        let user = self.db.get_user_by_email(&email).await?;

        let verified = match &user {
            Some(user) => verify_password(&req.password, &user.password_hash).unwrap_or_else(|e| {
                tracing::error!(user_id = %user.id, "Stored password hash is unusable: {}", e);
                false
            }),
            None => {
                verify_password(&req.password, &self.dummy_hash)?;
                false
            }
        };

        match user {
            Some(user) if verified => {
                tracing::info!(user_id = %user.id, tenant = %user.tenant_id, "Login succeeded");
                self.token_for(&user)
            }
            _ => {
                tracing::warn!("Login failed");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    /// Creates a new tenant whose first user is an admin, then logs them in.
    pub async fn register(&self, req: &RegisterRequest) -> Result<TokenResponse> {
        let email = validated_email(&req.email)?;
        check_password(&req.password)?;
        let name = non_empty("name", &req.name)?;
        let organization = non_empty("organization", &req.organization)?;

        let timestamp = now();
        let tenant = Tenant {
            id: new_id(),
            name: organization,
            created_at: timestamp,
        };
        let user = User {
            id: new_id(),
            tenant_id: tenant.id.clone(),
            email,
            name,
            password_hash: hash_password(&req.password)?,
            role: Role::Admin,
            created_at: timestamp,
            updated_at: timestamp,
        };

        self.db.create_tenant_with_admin(&tenant, &user).await?;
        tracing::info!(tenant = %tenant.id, user_id = %user.id, "Tenant registered");

        self.token_for(&user)
    }

    /// Adds a user to the caller's tenant. Admin only.
    pub async fn create_member(
        &self,
        caller: &Claims,
        req: &CreateUserRequest,
    ) -> Result<UserProfile> {
        require_admin(caller)?;
        let email = validated_email(&req.email)?;
        check_password(&req.password)?;

        let timestamp = now();
        let user = User {
            id: new_id(),
            tenant_id: caller.tenant.clone(),
            email,
            name: non_empty("name", &req.name)?,
            password_hash: hash_password(&req.password)?,
            role: req.role,
            created_at: timestamp,
            updated_at: timestamp,
        };

        self.db.create_user(&user).await?;
        tracing::info!(tenant = %user.tenant_id, user_id = %user.id, role = %user.role, "User created");

        Ok(user.into())
    }

    /// Profile of the token's subject.
    pub async fn me(&self, claims: &Claims) -> Result<UserProfile> {
        self.db
            .get_user_by_id(&claims.sub)
            .await?
            .filter(|u| u.tenant_id == claims.tenant)
            .map(UserProfile::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn list_users(&self, claims: &Claims) -> Result<Vec<UserProfile>> {
        Ok(self
            .db
            .list_users(&claims.tenant)
            .await?
            .into_iter()
            .map(UserProfile::from)
            .collect())
    }

    fn token_for(&self, user: &User) -> Result<TokenResponse> {
        let token = self.tokens.issue(
            &user.id,
            IdentityClaims {
                email: user.email.clone(),
                role: user.role,
                tenant: user.tenant_id.clone(),
            },
        )?;

        Ok(TokenResponse::bearer(token, self.tokens.access_expiry()))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validated_email(email: &str) -> Result<String> {
    let email = normalize_email(email);
    if !email.contains('@') {
        return Err(AppError::InvalidInput("A valid email is required".to_string()));
    }
    Ok(email)
}

fn check_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidInput(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::TursoClient;

    const SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

    async fn service() -> AuthService {
        let db: Arc<dyn DatabaseClient> = Arc::new(TursoClient::new_memory().await.unwrap());
        let tokens = Arc::new(TokenService::new(SECRET, "campaign-desk", "web", 3600));
        AuthService::new(db, tokens).unwrap()
    }

    fn registration(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "password123".to_string(),
            name: "Ada".to_string(),
            organization: "Acme".to_string(),
        }
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = service().await;
        let registered = auth.register(&registration("Ada@Acme.test")).await.unwrap();
        assert_eq!(registered.token_type, "Bearer");
        assert_eq!(registered.expires_in, 3600);

        let response = auth
            .login(&login("  ada@acme.test ", "password123"))
            .await
            .unwrap();
        let claims = auth.tokens.validate(&response.token).unwrap();
        assert_eq!(claims.email, "ada@acme.test");
        assert_eq!(claims.role, Role::Admin);

        let me = auth.me(&claims).await.unwrap();
        assert_eq!(me.id, claims.sub);
        assert_eq!(me.tenant_id, claims.tenant);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let auth = service().await;
        auth.register(&registration("ada@acme.test")).await.unwrap();

        let wrong_password = auth
            .login(&login("ada@acme.test", "not-the-password"))
            .await
            .unwrap_err();
        let unknown_email = auth
            .login(&login("nobody@acme.test", "password123"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_a_failed_login() {
        let auth = service().await;
        let timestamp = now();
        let tenant = Tenant {
            id: new_id(),
            name: "Acme".to_string(),
            created_at: timestamp,
        };
        let user = User {
            id: new_id(),
            tenant_id: tenant.id.clone(),
            email: "broken@acme.test".to_string(),
            name: "Broken".to_string(),
            password_hash: "not-a-phc-string".to_string(),
            role: Role::Admin,
            created_at: timestamp,
            updated_at: timestamp,
        };
        auth.db.create_tenant_with_admin(&tenant, &user).await.unwrap();

        let err = auth
            .login(&login("broken@acme.test", "password123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_register_validation() {
        let auth = service().await;

        let mut short = registration("ada@acme.test");
        short.password = "short".to_string();
        assert!(matches!(
            auth.register(&short).await,
            Err(AppError::InvalidInput(_))
        ));

        assert!(matches!(
            auth.register(&registration("not-an-email")).await,
            Err(AppError::InvalidInput(_))
        ));

        auth.register(&registration("ada@acme.test")).await.unwrap();
        assert!(matches!(
            auth.register(&registration("ADA@acme.test")).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_only_admin_creates_members() {
        let auth = service().await;
        let token = auth.register(&registration("ada@acme.test")).await.unwrap();
        let admin = auth.tokens.validate(&token.token).unwrap();

        let member = auth
            .create_member(
                &admin,
                &CreateUserRequest {
                    email: "viewer@acme.test".to_string(),
                    password: "password123".to_string(),
                    name: "Vic".to_string(),
                    role: Role::Viewer,
                },
            )
            .await
            .unwrap();
        assert_eq!(member.tenant_id, admin.tenant);
        assert_eq!(auth.list_users(&admin).await.unwrap().len(), 2);

        let viewer_token = auth
            .login(&login("viewer@acme.test", "password123"))
            .await
            .unwrap();
        let viewer = auth.tokens.validate(&viewer_token.token).unwrap();
        let err = auth
            .create_member(
                &viewer,
                &CreateUserRequest {
                    email: "other@acme.test".to_string(),
                    password: "password123".to_string(),
                    name: "Oz".to_string(),
                    role: Role::Admin,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
