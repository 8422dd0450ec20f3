//! ip-geo-batch Library
//!
//! Batch IP geolocation lookups: normalizes pasted address lists, sends
//! them upstream in paced batches and serves the results over HTTP.
//! Exposed as a library for integration tests.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use adapters::inbound::ApiServer;
pub use adapters::outbound::IpApiLookup;
pub use application::{LookupService, PipelineLimits, ServiceError};
pub use config::{load_config, Config};
pub use domain::entities::{LookupRecord, LookupStatus, RawInput, ResultEnvelope};
pub use domain::ports::{GeoLookup, LookupError};
