//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of a batch lookup request.
//! All of them live for the duration of one request; nothing is persisted.

use serde::{Deserialize, Serialize};

/// Raw address input as submitted by a caller.
///
/// Either one delimited blob of text (pasted or uploaded) or an explicit
/// list where each element is one candidate address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    /// Free-form text split on newlines, commas and whitespace
    Text(String),
    /// One candidate token per element
    List(Vec<String>),
}

impl From<&str> for RawInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<String>> for RawInput {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

/// Result of normalizing a [`RawInput`].
///
/// `addresses` holds unique, shape-checked addresses in first-occurrence
/// order. `rejected` holds every token that failed the check, in the order
/// encountered, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedAddressSet {
    pub addresses: Vec<String>,
    pub rejected: Vec<String>,
}

impl NormalizedAddressSet {
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }
}

/// Outcome tag of a single lookup, as reported by the upstream service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStatus {
    Success,
    Fail,
}

/// Geolocation result for one queried address.
///
/// Field names on the wire follow the upstream batch API so records can be
/// passed through verbatim. A failed lookup only carries `query` and
/// `message`; everything else is omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupRecord {
    pub status: LookupStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Address this record answers for
    #[serde(default)]
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "regionName", default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(rename = "lat", default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(rename = "lon", default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl LookupRecord {
    /// Build a failure placeholder for an address whose lookup did not happen.
    pub fn failure(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: LookupStatus::Fail,
            message: Some(message.into()),
            query: query.into(),
            country: None,
            region: None,
            city: None,
            isp: None,
            org: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == LookupStatus::Success
    }
}

/// Successful response to a lookup request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    /// Number of unique addresses dispatched
    pub total: usize,
    pub rejected: Vec<String>,
    /// One record per dispatched address, in input order
    pub results: Vec<LookupRecord>,
}

/// Error response to a lookup request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected: Option<Vec<String>>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            rejected: None,
        }
    }

    pub fn with_rejected(mut self, rejected: Vec<String>) -> Self {
        self.rejected = Some(rejected);
        self
    }
}
