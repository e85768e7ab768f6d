pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;

pub use models::{MatchFields, MatchModel, MatchType};
pub use repository::{InMemoryMatchRepository, MatchRepository, PostgresMatchRepository};
pub use service::MatchService;
