//! Domain validation for blocklist entries.
//!
//! A token extracted from a source list only becomes a [`Domain`] after it
//! has been normalized (AdBlock decoration stripped, lowercased) and passed
//! [`is_valid_domain`]. The normalized form is the value stored in a
//! [`DomainSet`], so extraction and validation always agree.

use std::collections::HashSet;
use std::fmt;

/// Characters used by AdBlock filter syntax that never belong to a hostname.
const DECORATION_CHARS: &[char] = &['*', '^', '|'];

/// Loopback/broadcast literals that must never end up in the blocklist.
/// Matched case-insensitively anywhere in the token.
const RESERVED_SUBSTRINGS: &[&str] = &["localhost", "127.0.0.1", "0.0.0.0", "::1"];

/// Minimum length of a domain after normalization
const MIN_DOMAIN_LEN: usize = 3;

/// Set of unique domains. Order is imposed only when rendering.
pub type DomainSet = HashSet<Domain>;

/// A normalized, validated, blockable domain name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Domain(String);

impl Domain {
    /// Normalize and validate a raw token.
    ///
    /// Returns `None` when the token is not a blockable domain.
    ///
    /// # Examples
    /// ```
    /// use hostmerge::domain::Domain;
    /// assert_eq!(Domain::parse("||Ads.Example.com^").unwrap().as_str(), "ads.example.com");
    /// assert!(Domain::parse("localhost").is_none());
    /// ```
    pub fn parse(token: &str) -> Option<Self> {
        let normalized = normalize(token);
        if is_valid_normalized(&normalized) {
            Some(Self(normalized))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check whether a token is a legitimate blockable domain.
///
/// Total: never panics, unparseable input simply returns `false`.
///
/// # Examples
/// ```
/// use hostmerge::domain::is_valid_domain;
/// assert!(is_valid_domain("example.com"));
/// assert!(!is_valid_domain("192.168.1.1"));
/// assert!(!is_valid_domain("::1"));
/// ```
pub fn is_valid_domain(token: &str) -> bool {
    !token.is_empty() && is_valid_normalized(&normalize(token))
}

/// Trim surrounding whitespace, strip AdBlock decoration, then lowercase.
fn normalize(token: &str) -> String {
    token
        .trim()
        .chars()
        .filter(|c| !DECORATION_CHARS.contains(c))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn is_valid_normalized(domain: &str) -> bool {
    if domain.is_empty() {
        return false;
    }

    // Already lowercase, so a plain substring search is case-insensitive
    if RESERVED_SUBSTRINGS.iter().any(|r| domain.contains(r)) {
        return false;
    }

    if !domain.contains('.') || domain.len() < MIN_DOMAIN_LEN {
        return false;
    }

    // Leftover inline comments or multi-token lines
    if domain.contains('#') || domain.chars().any(char::is_whitespace) {
        return false;
    }

    !is_ipv4_literal(domain)
}

/// Four dot-separated runs of decimal digits (no range check on octets).
fn is_ipv4_literal(s: &str) -> bool {
    let mut parts = 0;
    for part in s.split('.') {
        parts += 1;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    parts == 4
}
