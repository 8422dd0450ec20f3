//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};

/// Address family inferred from the textual shape of a token.
///
/// The check is deliberately permissive: it does not validate octet
/// ranges or the RFC 4291 grammar, it only filters out tokens that
/// obviously are not IP addresses before they are sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    /// Four dot-separated groups of 1-3 decimal digits
    V4,
    /// Hex digits and colons, at least one colon
    V6,
}

impl AddressKind {
    /// Classify a raw token.
    ///
    /// One leading `[` and one trailing `]` are stripped first (the
    /// bracketed IPv6 form used in URLs). Returns the stripped address
    /// together with its kind, or `None` if the token fails both shapes.
    ///
    /// # Examples
    /// ```
    /// use ip_geo_batch::domain::value_objects::AddressKind;
    ///
    /// assert_eq!(AddressKind::classify("8.8.8.8"), Some(("8.8.8.8", AddressKind::V4)));
    /// assert_eq!(AddressKind::classify("[::1]"), Some(("::1", AddressKind::V6)));
    /// assert_eq!(AddressKind::classify("example.com"), None);
    /// ```
    pub fn classify(token: &str) -> Option<(&str, Self)> {
        let stripped = token.strip_prefix('[').unwrap_or(token);
        let stripped = stripped.strip_suffix(']').unwrap_or(stripped);

        if Self::is_v4_shaped(stripped) {
            Some((stripped, Self::V4))
        } else if Self::is_v6_shaped(stripped) {
            Some((stripped, Self::V6))
        } else {
            None
        }
    }

    fn is_v4_shaped(s: &str) -> bool {
        let mut groups = 0;
        for group in s.split('.') {
            groups += 1;
            if group.is_empty() || group.len() > 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
                return false;
            }
        }
        groups == 4
    }

    fn is_v6_shaped(s: &str) -> bool {
        s.contains(':') && s.chars().all(|c| c == ':' || c.is_ascii_hexdigit())
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V4 => "v4",
            Self::V6 => "v6",
        }
    }
}

impl std::fmt::Display for AddressKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
