pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;
pub mod types;

pub use middleware::{jwt_auth, require_admin};
pub use models::{ProfileModel, Role};
pub use repository::{InMemoryProfileRepository, PostgresProfileRepository, ProfileRepository};
pub use service::AuthService;
pub use types::{AuthClaims, AuthUser};
