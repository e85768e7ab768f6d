use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::{ProfileModel, Role};

/// JWT claims carried by every access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthClaims {
    pub sub: String, // profile id
    pub email: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

/// The caller resolved by `jwt_auth`, stored as a request extension
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub profile_id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&ProfileModel> for AuthUser {
    fn from(profile: &ProfileModel) -> Self {
        Self {
            profile_id: profile.id.clone(),
            email: profile.email.clone(),
            full_name: profile.full_name.clone(),
            role: profile.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// Public view of a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<ProfileModel> for ProfileResponse {
    fn from(profile: ProfileModel) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            role: profile.role,
            created_at: profile.created_at,
        }
    }
}

/// Returned by sign-up and login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub profile: ProfileResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialization() {
        let claims = AuthClaims {
            sub: "profile-id".to_string(),
            email: "stan@example.com".to_string(),
            role: Role::Admin,
            exp: 1234567890,
            iat: 1234567800,
        };

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"admin\""));

        let deserialized: AuthClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, claims);
    }

    #[test]
    fn test_update_role_request_rejects_unknown_role() {
        assert!(serde_json::from_str::<UpdateRoleRequest>(r#"{"role": "owner"}"#).is_err());

        let request: UpdateRoleRequest = serde_json::from_str(r#"{"role": "coach"}"#).unwrap();
        assert_eq!(request.role, Role::Coach);
    }
}
