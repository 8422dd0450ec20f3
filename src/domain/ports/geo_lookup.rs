//! Geo Lookup Port
//!
//! Defines the interface for resolving a batch of addresses to
//! geolocation records through an external service.

use crate::domain::entities::LookupRecord;
use async_trait::async_trait;

/// Failure of one batch call to the lookup service.
///
/// The `Display` form becomes the `message` of the placeholder records
/// synthesized for every address in the failed batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// Upstream answered with a non-success HTTP status
    #[error("HTTP {0}")]
    Status(u16),
    /// Request never produced a response (connect, timeout, ...)
    #[error("request failed: {0}")]
    Transport(String),
    /// Response body could not be decoded as a list of records
    #[error("invalid upstream response: {0}")]
    Decode(String),
    /// Response carried a different number of records than were sent
    #[error("upstream returned {received} records for {expected} addresses")]
    CountMismatch { expected: usize, received: usize },
}

/// Batch resolver for IP geolocation.
///
/// This is an outbound port that abstracts the lookup provider.
/// Implementations return exactly one record per submitted address, in
/// submission order, or an error for the whole batch.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Resolve one batch of addresses.
    async fn lookup_batch(&self, addresses: &[String]) -> Result<Vec<LookupRecord>, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_messages() {
        assert_eq!(LookupError::Status(500).to_string(), "HTTP 500");
        assert_eq!(
            LookupError::Transport("connection refused".to_string()).to_string(),
            "request failed: connection refused"
        );
        assert_eq!(
            LookupError::CountMismatch {
                expected: 100,
                received: 99
            }
            .to_string(),
            "upstream returned 99 records for 100 addresses"
        );
    }
}
