pub mod aggregate;
pub mod forecast;
pub mod handlers;
pub mod rankings;
pub mod results;
pub mod score;
pub mod service;
pub mod summary;
pub mod types;

mod errors;
pub mod models;

pub use errors::StatsError;
pub use forecast::NextMatchForecast;
pub use models::*;
pub use results::{MatchTypeFilter, ResultsReport};
pub use score::{ClubScore, Outcome, Scoreline, Venue};
pub use service::StatsService;
