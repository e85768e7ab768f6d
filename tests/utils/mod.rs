pub mod actions;
pub mod assertions;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use actions::{absent, days_from_today, present, TestResponse};
pub use assertions::ResponseAssertion;
#[allow(unused_imports)]
pub use setup::{TestApp, TestAppBuilder, ADMIN_EMAIL, PASSWORD};
