use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Access level of a profile
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Admin,
    Player,
    Coach,
}

/// Database model for the profiles table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileModel {
    pub id: String,
    pub email: String, // lower-cased, unique
    pub full_name: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl ProfileModel {
    pub fn new(email: String, full_name: String, role: Role, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            full_name,
            role,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_profile() {
        let profile = ProfileModel::new(
            "stan@example.com".to_string(),
            "Stan".to_string(),
            Role::Player,
            "hash".to_string(),
        );

        assert!(!profile.id.is_empty());
        assert_eq!(profile.role, Role::Player);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let profile = ProfileModel::new(
            "stan@example.com".to_string(),
            "Stan".to_string(),
            Role::Coach,
            "secret-hash".to_string(),
        );

        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"coach\""));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
        assert_eq!(Role::Player.to_string(), "player");
        assert!(Role::from_str("owner").is_err());
    }
}
