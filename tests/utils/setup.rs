use axum::Router;

use teamstats::{build_router, AppConfig, AppState};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const ADMIN_EMAIL: &str = "coach.admin@example.com";
pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub router: Router,
    pub config: AppConfig,
}

pub struct TestAppBuilder {
    config: AppConfig,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig {
                jwt_secret: "integration-test-secret".to_string(),
                password_hash_iterations: 1_000,
                admin_emails: vec![ADMIN_EMAIL.to_string()],
                ..AppConfig::default()
            },
        }
    }

    #[allow(dead_code)]
    pub fn with_club_name(mut self, club_name: &str) -> Self {
        self.config.club_name = club_name.to_string();
        self
    }

    #[allow(dead_code)]
    pub fn with_roster(mut self, roster: Vec<&str>) -> Self {
        self.config.roster = roster.into_iter().map(str::to_string).collect();
        self
    }

    pub fn build(self) -> TestApp {
        let state = AppState::in_memory(self.config.clone());
        TestApp {
            router: build_router(state),
            config: self.config,
        }
    }
}
