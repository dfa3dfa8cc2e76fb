//! Hybrid acquisition: cache, external source, curated fallback

mod error;
mod metrics;
pub mod ports;
mod service;

pub use error::AcquisitionError;
pub use metrics::AcquisitionStats;
pub use service::AcquisitionService;
