//! Lookup Service - Main application use case
//!
//! Orchestrates the batch lookup pipeline: normalizing input, enforcing
//! request limits, dispatching paced batches to the lookup port and
//! aggregating the results. This is the primary interface for the
//! inbound adapter.

use crate::domain::entities::{LookupRecord, NormalizedAddressSet, RawInput, ResultEnvelope};
use crate::domain::ports::GeoLookup;
use crate::domain::services::{BatchPlanner, Normalizer, ResultAggregator};
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

/// Default maximum number of unique addresses per request.
pub const DEFAULT_MAX_ADDRESSES: usize = 6000;
/// Default (and upstream maximum) number of addresses per batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;
/// Default pause between consecutive batch calls.
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(750);

/// Limits applied to every lookup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineLimits {
    pub max_addresses: usize,
    pub batch_size: usize,
    pub batch_delay: Duration,
}

impl Default for PipelineLimits {
    fn default() -> Self {
        Self {
            max_addresses: DEFAULT_MAX_ADDRESSES,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }
}

/// Errors surfaced to callers of [`LookupService::submit`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("no valid IP addresses found")]
    NoValidAddresses { rejected: Vec<String> },
    #[error("too many IP addresses: maximum is {max}, got {count}")]
    TooManyAddresses { max: usize, count: usize },
    #[error("internal server error")]
    Internal,
}

impl ServiceError {
    /// Whether this error was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Internal)
    }
}

/// Lookup service - main application use case.
///
/// Cheap to clone; clones share the same lookup port.
#[derive(Clone)]
pub struct LookupService {
    lookup: Arc<dyn GeoLookup>,
    limits: PipelineLimits,
}

impl LookupService {
    /// Create a new lookup service.
    pub fn new(lookup: Arc<dyn GeoLookup>, limits: PipelineLimits) -> Self {
        Self { lookup, limits }
    }

    pub fn limits(&self) -> &PipelineLimits {
        &self.limits
    }

    /// Normalize input and enforce request limits.
    ///
    /// Nothing is sent upstream when this fails.
    pub fn prepare(&self, input: &RawInput) -> Result<NormalizedAddressSet, ServiceError> {
        let set = Normalizer::normalize(input);

        if set.is_empty() {
            return Err(ServiceError::NoValidAddresses {
                rejected: set.rejected,
            });
        }

        if set.len() > self.limits.max_addresses {
            return Err(ServiceError::TooManyAddresses {
                max: self.limits.max_addresses,
                count: set.len(),
            });
        }

        Ok(set)
    }

    /// Handle one lookup request end to end.
    ///
    /// The pipeline runs on its own task, so a caller that goes away does
    /// not cancel batches already in flight. A panic inside the pipeline
    /// is logged and reported as [`ServiceError::Internal`] with no
    /// partial results.
    #[tracing::instrument(name = "lookup", skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
    pub async fn submit(&self, input: RawInput) -> Result<ResultEnvelope, ServiceError> {
        let set = match self.prepare(&input) {
            Ok(set) => set,
            Err(e) => {
                tracing::info!("rejected lookup request: {}", e);
                return Err(e);
            }
        };

        tracing::info!(
            "accepted {} addresses ({} rejected tokens)",
            set.len(),
            set.rejected.len()
        );

        let service = self.clone();
        let task = tokio::spawn(
            async move {
                let results = service
                    .dispatch(&set.addresses, |completed, total| {
                        tracing::debug!("progress {}/{}", completed, total);
                    })
                    .await;

                ResultEnvelope {
                    total: set.addresses.len(),
                    rejected: set.rejected,
                    results,
                }
            }
            .in_current_span(),
        );

        match task.await {
            Ok(envelope) => {
                let failed = envelope.results.iter().filter(|r| !r.is_success()).count();
                tracing::info!(
                    "lookup complete: {} results, {} failed",
                    envelope.results.len(),
                    failed
                );
                Ok(envelope)
            }
            Err(e) => {
                tracing::error!("lookup pipeline failed: {}", e);
                Err(ServiceError::Internal)
            }
        }
    }

    /// Look up `addresses` in paced, strictly sequential batches.
    ///
    /// `on_progress(completed, total)` is called after every batch with the
    /// number of addresses whose batch has finished. Batch failures never
    /// abort the run: each address of a failed batch gets a placeholder
    /// record, so the result always has one record per address, in order.
    pub async fn dispatch<F>(&self, addresses: &[String], on_progress: F) -> Vec<LookupRecord>
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        let total = addresses.len();
        let batches = BatchPlanner::plan(addresses, self.limits.batch_size);
        let batch_count = batches.len();
        let mut per_batch = Vec::with_capacity(batch_count);

        for batch in batches {
            let records = match self.lookup.lookup_batch(batch.addresses).await {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(
                        "batch {}/{} ({} addresses) failed: {}",
                        batch.index + 1,
                        batch_count,
                        batch.len(),
                        e
                    );
                    let message = e.to_string();
                    batch
                        .addresses
                        .iter()
                        .map(|address| LookupRecord::failure(address.as_str(), message.as_str()))
                        .collect()
                }
            };
            per_batch.push(records);

            on_progress(batch.end(), total);

            if batch.index + 1 < batch_count {
                tokio::time::sleep(self.limits.batch_delay).await;
            }
        }

        ResultAggregator::aggregate(per_batch)
    }
}
