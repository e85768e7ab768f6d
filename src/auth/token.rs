use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::models::ProfileModel;
use super::types::AuthClaims;
use crate::config::AppConfig;
use crate::shared::AppError;

/// Configuration for JWT token operations
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    pub expiration_days: i64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, expiration_days: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_days,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.jwt_secret.clone(), config.token_expiration_days)
    }

    /// Creates a signed token for the profile
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub fn create_token(&self, profile: &ProfileModel) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = (now + Duration::days(self.expiration_days)).timestamp() as usize;

        debug!(
            expiration_days = self.expiration_days,
            exp_timestamp = exp,
            "Creating JWT token with expiration"
        );

        let claims = AuthClaims {
            sub: profile.id.clone(),
            email: profile.email.clone(),
            role: profile.role,
            exp,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            debug!(error = %e, "Failed to encode JWT token");
            AppError::JwtError(e.to_string())
        })
    }

    /// Validates signature and expiry and returns the claims
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<AuthClaims, AppError> {
        decode::<AuthClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| {
            debug!(
                profile_id = %data.claims.sub,
                exp = data.claims.exp,
                "JWT token decoded successfully"
            );
            data.claims
        })
        .map_err(|e| {
            debug!(error = %e, "Failed to decode JWT token");
            AppError::JwtError(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;

    fn profile() -> ProfileModel {
        ProfileModel::new(
            "stan@example.com".to_string(),
            "Stan".to_string(),
            Role::Player,
            "hash".to_string(),
        )
    }

    #[test]
    fn test_create_and_validate_token() {
        let config = TokenConfig::new("test-secret", 7);
        let profile = profile();

        let token = config.create_token(&profile).unwrap();
        assert!(!token.is_empty());

        let claims = config.validate_token(&token).unwrap();
        assert_eq!(claims.sub, profile.id);
        assert_eq!(claims.email, "stan@example.com");
        assert_eq!(claims.role, Role::Player);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_invalid_token() {
        let config = TokenConfig::new("test-secret", 7);
        let result = config.validate_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::JwtError(_))));
    }

    #[test]
    fn test_token_with_different_secret() {
        let token = TokenConfig::new("first-secret", 7)
            .create_token(&profile())
            .unwrap();

        let result = TokenConfig::new("second-secret", 7).validate_token(&token);
        assert!(matches!(result, Err(AppError::JwtError(_))));
    }

    #[test]
    fn test_expired_token() {
        // Past the default 60 second leeway
        let config = TokenConfig::new("test-secret", -1);
        let token = config.create_token(&profile()).unwrap();

        assert!(matches!(
            config.validate_token(&token),
            Err(AppError::JwtError(_))
        ));
    }
}
