//! HTTP surface for the scam-risk service.
//!
//! RULE: No scoring logic lives here. Handlers delegate to the
//! query service and map its errors to status codes.

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::build_router;
