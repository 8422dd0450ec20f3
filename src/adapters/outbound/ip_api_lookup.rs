//! ip-api.com Batch Lookup
//!
//! Implements GeoLookup against the ip-api.com batch endpoint.
//!
//! The free endpoint is plain HTTP only. Browsers loading the page over
//! HTTPS cannot call it directly, so all upstream traffic goes through
//! this adapter on the server side.

use crate::domain::entities::LookupRecord;
use crate::domain::ports::{GeoLookup, LookupError};
use async_trait::async_trait;
use std::time::Duration;

/// Default batch endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://ip-api.com/batch";

/// Fields requested for every address.
pub const LOOKUP_FIELDS: &str = "status,message,query,country,regionName,city,isp,org,lat,lon";

/// ip-api.com batch resolver.
///
/// Sends each batch as a JSON array of address strings and expects a
/// JSON array with one record per address, in the same order.
pub struct IpApiLookup {
    client: reqwest::Client,
    endpoint: String,
}

impl IpApiLookup {
    /// Create a resolver for `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GeoLookup for IpApiLookup {
    async fn lookup_batch(&self, addresses: &[String]) -> Result<Vec<LookupRecord>, LookupError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .query(&[("fields", LOOKUP_FIELDS)])
            .json(addresses)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let records: Vec<LookupRecord> = resp
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        if records.len() != addresses.len() {
            return Err(LookupError::CountMismatch {
                expected: addresses.len(),
                received: records.len(),
            });
        }

        tracing::debug!("resolved batch of {} addresses", records.len());
        Ok(records)
    }
}
