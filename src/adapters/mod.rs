//! Adapters Layer
//!
//! Inbound adapters drive the application (HTTP API); outbound adapters
//! implement the domain ports (upstream lookup service).

pub mod inbound;
pub mod outbound;
