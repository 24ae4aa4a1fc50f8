//! Cropsense - agronomic signal aggregation pipeline
//!
//! Aggregates weather, soil composition, and market price signals from
//! independent third-party services, normalizes them into a canonical
//! feature set, and forwards that feature set to an external prediction
//! service. The crate exposes three entry points consumed by a routing
//! layer: crop prediction, crop yield prediction, and market lookup.

pub mod config;
pub mod error;
pub mod external;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::AdvisorService;
