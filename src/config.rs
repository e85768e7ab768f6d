use std::net::SocketAddr;
use tracing::warn;

pub const DEFAULT_CLUB_NAME: &str = "Ultrawear Indoor";
const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// Squad used when `ROSTER` is not set
pub const DEFAULT_ROSTER: [&str; 14] = [
    "Stan", "Rette", "Wanny", "Arne", "Emile", "Vik", "Nicolas", "Mats", "Brian", "Slekke",
    "Didier", "Elias", "Toby", "Pieter",
];

/// Where match and profile data lives
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    InMemory,
    Postgres { database_url: String },
}

/// Runtime configuration, read once at start-up
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageBackend,
    pub jwt_secret: String,
    pub token_expiration_days: i64,
    pub password_hash_iterations: u32,
    pub club_name: String,
    pub roster: Vec<String>,
    pub admin_emails: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            storage: StorageBackend::InMemory,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_expiration_days: 7,
            password_hash_iterations: 100_000,
            club_name: DEFAULT_CLUB_NAME.to_string(),
            roster: DEFAULT_ROSTER.iter().map(|name| name.to_string()).collect(),
            admin_emails: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup so tests don't touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = parse_or_default(&lookup, "BIND_ADDR", defaults.bind_addr);
        let token_expiration_days = parse_or_default(
            &lookup,
            "TOKEN_EXPIRATION_DAYS",
            defaults.token_expiration_days,
        );
        let password_hash_iterations = parse_or_default(
            &lookup,
            "PASSWORD_HASH_ITERATIONS",
            defaults.password_hash_iterations,
        );

        let storage = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(database_url) => StorageBackend::Postgres { database_url },
            None => StorageBackend::InMemory,
        };

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            warn!("JWT_SECRET not set, using the development secret");
            defaults.jwt_secret.clone()
        });

        let club_name = lookup("CLUB_NAME")
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or(defaults.club_name);

        let roster = lookup("ROSTER")
            .map(|list| split_list(&list))
            .filter(|names| !names.is_empty())
            .unwrap_or(defaults.roster);

        let admin_emails = lookup("ADMIN_EMAILS")
            .map(|list| {
                split_list(&list)
                    .into_iter()
                    .map(|email| email.to_lowercase())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            bind_addr,
            storage,
            jwt_secret,
            token_expiration_days,
            password_hash_iterations,
            club_name,
            roster,
            admin_emails,
        }
    }

    /// Whether a sign-up with this e-mail is granted the admin role
    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.admin_emails.iter().any(|admin| *admin == email)
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Invalid configuration value, using default");
            default
        }),
        None => default,
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
