// Library crate for the team statistics service
// This file exposes the public API for integration tests

pub mod app;
pub mod auth;
pub mod config;
pub mod matches;
pub mod performance;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use app::build_router;
pub use config::{AppConfig, StorageBackend};
pub use shared::{AppError, AppState};
