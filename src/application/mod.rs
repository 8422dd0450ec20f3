//! Application Layer
//!
//! Use cases that orchestrate the domain through its ports.

mod lookup_service;

pub use lookup_service::{
    LookupService, PipelineLimits, ServiceError, DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE,
    DEFAULT_MAX_ADDRESSES,
};
