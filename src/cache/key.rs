//! Cache key construction.

use std::fmt;

/// Namespace prefix separating vocabulary entries from any other cache use.
const NAMESPACE: &str = "vocabulary";

/// A normalized, namespaced cache key.
///
/// Normalization (trim + lowercase) happens here, at construction, so that
/// `"  Resilient "` and `"resilient"` resolve to the same entry. The cache
/// itself treats keys as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Build the key for a word lookup: `vocabulary:<trimmed, lowercased>`.
    pub fn for_word(raw: &str) -> Self {
        Self(format!("{}:{}", NAMESPACE, raw.trim().to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.0
    }
}
