pub mod models;
pub mod repository;

pub use models::{PerformanceModel, PlayerEntry};
pub use repository::{
    InMemoryPerformanceRepository, PerformanceRepository, PostgresPerformanceRepository,
};
