//! # vocabulary-ai
//!
//! Backend for a vocabulary-learning app: given an English word, return an
//! AI-generated structured description (part of speech, meaning, usage
//! examples with translations, synonyms, antonyms, word forms, common
//! phrases) from the Google Gemini API — with an in-memory TTL cache in
//! front of the provider and rate-limit-aware retries around the call.
//!
//! ## Control Flow
//!
//! A lookup normalizes the word into a namespaced cache key and consults
//! the cache first. On a hit the provider is skipped entirely. On a miss
//! the provider is called through the retry wrapper (bounded exponential
//! backoff, reacting only to rate-limit signals), the response is parsed
//! (markdown fences stripped, missing fields defaulted), and the result is
//! cached for 24 hours before being returned.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Generic TTL cache with lazy expiry and a periodic sweeper |
//! | [`retry`] | Bounded backoff retry for rate-limited provider calls |
//! | [`provider`] | Provider trait and the Gemini `generateContent` client |
//! | [`lookup`] | Orchestration tying cache, retry, and parsing together |
//! | [`prompt`] | The word-details instruction sent to the provider |
//! | [`types`] | Wire types with always-populated fields |
//! | [`server`] | Axum routes for lookup, cache management, model listing |
//! | [`config`] | Environment-driven configuration |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use vocabulary_ai::cache::TtlCache;
//! use vocabulary_ai::lookup::WordLookupService;
//! use vocabulary_ai::provider::{GeminiClient, GeminiConfig};
//! use vocabulary_ai::retry::RetryPolicy;
//!
//! # async fn run() -> vocabulary_ai::Result<()> {
//! let provider = Arc::new(GeminiClient::new(GeminiConfig::new("api-key"))?);
//! let service = WordLookupService::new(
//!     TtlCache::new(),
//!     provider,
//!     RetryPolicy::default(),
//!     Duration::from_secs(24 * 60 * 60),
//! );
//! let lookup = service.lookup("resilient").await?;
//! println!("{} (cached: {})", lookup.details.meaning, lookup.cached);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod lookup;
pub mod prompt;
pub mod provider;
pub mod retry;
pub mod server;
pub mod types;

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

pub use cache::{CacheKey, CacheStats, TtlCache};
pub use config::Config;
pub use error::Error;
pub use lookup::{Lookup, WordLookupService};
pub use provider::{GeminiClient, GeminiConfig, LookupProvider, ModelInfo};
pub use retry::{retry_with_backoff, RetryClass, RetryPolicy};
pub use types::WordDetails;
