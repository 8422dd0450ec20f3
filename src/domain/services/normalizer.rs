//! Input Normalizer Service
//!
//! Pure domain logic turning raw caller input into a deduplicated,
//! shape-checked address set plus the tokens that were rejected.

use crate::domain::entities::{NormalizedAddressSet, RawInput};
use crate::domain::value_objects::AddressKind;
use std::collections::HashSet;

/// Normalizer for raw address input.
pub struct Normalizer;

impl Normalizer {
    /// Normalize raw input.
    ///
    /// Text input is split on commas, newlines and runs of whitespace.
    /// List input is taken element by element. In both cases tokens are
    /// trimmed and empty ones dropped before the shape check.
    ///
    /// An empty address set is not an error here; the caller decides
    /// how to report it.
    pub fn normalize(input: &RawInput) -> NormalizedAddressSet {
        match input {
            RawInput::Text(text) => Self::collect(Self::tokenize(text)),
            RawInput::List(items) => Self::collect(
                items
                    .iter()
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty()),
            ),
        }
    }

    /// Split a text blob into candidate tokens.
    pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
        text.split(|c: char| c == ',' || c.is_whitespace())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn collect<'a, I>(tokens: I) -> NormalizedAddressSet
    where
        I: Iterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut set = NormalizedAddressSet::default();

        for token in tokens {
            match AddressKind::classify(token) {
                Some((address, _)) => {
                    if seen.insert(address) {
                        set.addresses.push(address.to_string());
                    }
                }
                None => set.rejected.push(token.to_string()),
            }
        }

        set
    }
}
