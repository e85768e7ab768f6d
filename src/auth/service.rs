use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::{
    models::{ProfileModel, Role},
    password::PasswordHasher,
    repository::ProfileRepository,
    token::TokenConfig,
    types::{AuthResponse, AuthUser, LoginRequest, ProfileResponse, SignUpRequest},
};
use crate::config::AppConfig;
use crate::shared::AppError;

pub const MIN_PASSWORD_LEN: usize = 8;

const INVALID_CREDENTIALS: &str = "Invalid e-mail or password";

/// Service for sign-up, login and role management
pub struct AuthService {
    repository: Arc<dyn ProfileRepository + Send + Sync>,
    config: Arc<AppConfig>,
    token_config: TokenConfig,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(
        repository: Arc<dyn ProfileRepository + Send + Sync>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            repository,
            token_config: TokenConfig::from_config(&config),
            hasher: PasswordHasher::new(config.password_hash_iterations),
            config,
        }
    }

    #[instrument(skip(self, request))]
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&request.email);
        if !email.contains('@') {
            return Err(AppError::Validation("A valid e-mail is required".to_string()));
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        let full_name = request.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(AppError::Validation("Full name is required".to_string()));
        }

        let role = if self.config.is_admin_email(&email) {
            Role::Admin
        } else {
            Role::Player
        };

        let password_hash = self.hash_password(request.password).await?;
        let profile = ProfileModel::new(email, full_name, role, password_hash);
        self.repository.create_profile(&profile).await?;

        info!(profile_id = %profile.id, role = %profile.role, "Profile signed up");
        self.issue(profile)
    }

    /// Unknown e-mail and wrong password fail the same way
    #[instrument(skip(self, request))]
    pub async fn sign_in(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&request.email);

        let Some(profile) = self.repository.find_by_email(&email).await? else {
            warn!("Login attempt for unknown e-mail");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let matches = self
            .verify_password(request.password, profile.password_hash.clone())
            .await?;
        if !matches {
            warn!(profile_id = %profile.id, "Login attempt with wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        info!(profile_id = %profile.id, "Profile signed in");
        self.issue(profile)
    }

    /// Resolves a bearer token to the stored profile. The role comes from
    /// storage, not from the token, so role changes apply immediately.
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, AppError> {
        let claims = self.token_config.validate_token(token).map_err(|e| {
            warn!(error = %e, "Rejected bearer token");
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

        let profile = self.repository.get_profile(&claims.sub).await?.ok_or_else(|| {
            warn!(profile_id = %claims.sub, "Token refers to a missing profile");
            AppError::Unauthorized("Profile no longer exists".to_string())
        })?;

        Ok(AuthUser::from(&profile))
    }

    #[instrument(skip(self))]
    pub async fn get_profile(&self, profile_id: &str) -> Result<ProfileResponse, AppError> {
        self.repository
            .get_profile(profile_id)
            .await?
            .map(ProfileResponse::from)
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    #[instrument(skip(self))]
    pub async fn set_role(&self, profile_id: &str, role: Role) -> Result<ProfileResponse, AppError> {
        let profile = self.repository.update_role(profile_id, role).await?;
        info!(profile_id = %profile_id, role = %role, "Profile role changed");
        Ok(profile.into())
    }

    #[instrument(skip(self))]
    pub async fn list_profiles(&self) -> Result<Vec<ProfileResponse>, AppError> {
        let profiles = self.repository.list_profiles().await?;
        Ok(profiles.into_iter().map(ProfileResponse::from).collect())
    }

    // PBKDF2 is CPU bound; keep it off the async worker threads
    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| {
                error!(error = %e, "Password hashing task failed");
                AppError::Internal
            })
    }

    async fn verify_password(&self, password: String, stored: String) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| {
                error!(error = %e, "Password verification task failed");
                AppError::Internal
            })
    }

    fn issue(&self, profile: ProfileModel) -> Result<AuthResponse, AppError> {
        let token = self.token_config.create_token(&profile)?;
        Ok(AuthResponse {
            token,
            profile: profile.into(),
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::InMemoryProfileRepository;
    use crate::shared::test_utils::test_config;
    use rstest::rstest;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(test_config()),
        )
    }

    fn sign_up(email: &str, password: &str, full_name: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
        }
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_normalizes_email_and_assigns_player() {
        let service = service();

        let response = service
            .sign_up(sign_up("  Stan@Example.COM ", "password123", " Stan "))
            .await
            .unwrap();

        assert_eq!(response.profile.email, "stan@example.com");
        assert_eq!(response.profile.full_name, "Stan");
        assert_eq!(response.profile.role, Role::Player);
        assert!(!response.token.is_empty());
    }

    #[tokio::test]
    async fn test_configured_admin_email_gets_admin_role() {
        let response = service()
            .sign_up(sign_up("ADMIN@example.com", "password123", "Boss"))
            .await
            .unwrap();

        assert_eq!(response.profile.role, Role::Admin);
    }

    #[rstest]
    #[case("not-an-email", "password123", "Stan")]
    #[case("stan@example.com", "short", "Stan")]
    #[case("stan@example.com", "password123", "   ")]
    #[tokio::test]
    async fn test_sign_up_validation(
        #[case] email: &str,
        #[case] password: &str,
        #[case] full_name: &str,
    ) {
        let result = service().sign_up(sign_up(email, password, full_name)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_conflicts() {
        let service = service();
        service
            .sign_up(sign_up("stan@example.com", "password123", "Stan"))
            .await
            .unwrap();

        let result = service
            .sign_up(sign_up("STAN@example.com", "password456", "Other Stan"))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_sign_in() {
        let service = service();
        service
            .sign_up(sign_up("stan@example.com", "password123", "Stan"))
            .await
            .unwrap();

        let response = service
            .sign_in(login("Stan@example.com", "password123"))
            .await
            .unwrap();
        assert_eq!(response.profile.email, "stan@example.com");

        let user = service.authenticate(&response.token).await.unwrap();
        assert_eq!(user.profile_id, response.profile.id);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_sign_in_yields_while_hashing() {
        let config = AppConfig {
            password_hash_iterations: 20_000,
            ..test_config()
        };
        let service = AuthService::new(
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(config),
        );
        service
            .sign_up(sign_up("stan@example.com", "password123", "Stan"))
            .await
            .unwrap();

        // On a single-threaded runtime the sibling future only runs if
        // sign_in gives the thread back while the hash is computed
        let other_ran = AtomicBool::new(false);
        let ((result, ran_before_login_finished), _) = tokio::join!(
            async {
                let result = service.sign_in(login("stan@example.com", "password123")).await;
                (result, other_ran.load(Ordering::SeqCst))
            },
            async { other_ran.store(true, Ordering::SeqCst) },
        );

        assert!(result.is_ok());
        assert!(ran_before_login_finished);
    }

    #[tokio::test]
    async fn test_sign_in_failures_look_alike() {
        let service = service();
        service
            .sign_up(sign_up("stan@example.com", "password123", "Stan"))
            .await
            .unwrap();

        let wrong_password = service.sign_in(login("stan@example.com", "nope-nope")).await;
        let unknown = service.sign_in(login("ghost@example.com", "password123")).await;

        match (wrong_password, unknown) {
            (Err(AppError::Unauthorized(a)), Err(AppError::Unauthorized(b))) => assert_eq!(a, b),
            other => panic!("expected two Unauthorized errors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_authenticate_uses_stored_role() {
        let service = service();
        let response = service
            .sign_up(sign_up("stan@example.com", "password123", "Stan"))
            .await
            .unwrap();

        service
            .set_role(&response.profile.id, Role::Admin)
            .await
            .unwrap();

        let user = service.authenticate(&response.token).await.unwrap();
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn test_authenticate_rejects_garbage_and_missing_profiles() {
        let service = service();
        assert!(matches!(
            service.authenticate("garbage").await,
            Err(AppError::Unauthorized(_))
        ));

        // Token signed with the same secret for a profile that was never stored
        let orphan = ProfileModel::new(
            "ghost@example.com".to_string(),
            "Ghost".to_string(),
            Role::Admin,
            String::new(),
        );
        let token = TokenConfig::from_config(&test_config())
            .create_token(&orphan)
            .unwrap();
        assert!(matches!(
            service.authenticate(&token).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_list_and_get_profiles() {
        let service = service();
        let created = service
            .sign_up(sign_up("stan@example.com", "password123", "Stan"))
            .await
            .unwrap();

        assert_eq!(service.list_profiles().await.unwrap().len(), 1);
        assert_eq!(
            service.get_profile(&created.profile.id).await.unwrap().email,
            "stan@example.com"
        );
        assert!(matches!(
            service.get_profile("missing").await,
            Err(AppError::NotFound(_))
        ));
    }
}
