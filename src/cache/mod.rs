//! In-memory TTL cache for word-lookup results.
//!
//! Caching sits in front of the AI provider to avoid paying for repeated
//! lookups of the same word. Entries expire after a per-entry TTL; expiry is
//! enforced both lazily (an expired entry is removed the moment a read
//! touches it) and proactively (a periodic sweep evicts entries that are
//! never read again, bounding worst-case memory).
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`TtlCache`] | Generic keyed store with per-entry expiry |
//! | [`CacheStats`] | Live entry count and key listing |
//! | [`SweeperHandle`] | Owns the periodic sweep task, stops it on shutdown |
//! | [`CacheKey`] | Normalized, namespaced key construction |
//!
//! The cache performs no key normalization itself; callers build keys via
//! [`CacheKey`] so logically-equal lookups land on the same entry.

mod key;
mod store;

pub use key::CacheKey;
pub use store::{CacheStats, SweeperHandle, TtlCache};
