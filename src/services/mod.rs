//! Pipeline stages: feature extraction, fallback policy, completeness gate,
//! and the aggregation coordinator.

pub mod advisor;
pub mod fallback;
pub mod features;
pub mod gate;

pub use advisor::AdvisorService;
pub use features::DerivedFeatures;
