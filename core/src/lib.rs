//! Municipal scam-risk scoring.
//!
//! Pipeline, leaf first:
//!   feature_store → model (startup training) → categories →
//!   classifier / narrative → query
//!
//! Everything is built once by `context::AppContext::initialize` and is
//! immutable afterwards, so queries need no locking.

pub mod categories;
pub mod classifier;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod feature_store;
pub mod model;
pub mod narrative;
pub mod query;
pub mod rng;
pub mod types;

pub use config::AppConfig;
pub use context::AppContext;
pub use error::{DataSourceError, ModelError, PipelineError, QueryError};
