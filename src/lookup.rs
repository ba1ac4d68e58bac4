//! Word-lookup orchestration: cache-first, provider on miss.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheKey, TtlCache};
use crate::error::Error;
use crate::prompt::word_details_prompt;
use crate::provider::LookupProvider;
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::types::WordDetails;
use crate::Result;

/// A lookup outcome, annotated with where it came from.
#[derive(Debug, Clone)]
pub struct Lookup {
    pub details: WordDetails,
    /// True when served from the cache without a provider call.
    pub cached: bool,
}

/// Orchestrates a word lookup: normalize the key, consult the cache, and on
/// a miss fetch from the provider (with rate-limit retries), parse, and fill
/// the cache.
///
/// Concurrent misses for the same word are intentionally not coalesced; each
/// caller fetches independently and the last write wins. See DESIGN.md.
pub struct WordLookupService {
    cache: TtlCache<WordDetails>,
    provider: Arc<dyn LookupProvider>,
    retry: RetryPolicy,
    cache_ttl: Duration,
}

impl WordLookupService {
    pub fn new(
        cache: TtlCache<WordDetails>,
        provider: Arc<dyn LookupProvider>,
        retry: RetryPolicy,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            provider,
            retry,
            cache_ttl,
        }
    }

    /// Handle on the underlying cache, for the management endpoints.
    pub fn cache(&self) -> &TtlCache<WordDetails> {
        &self.cache
    }

    pub async fn lookup(&self, word: &str) -> Result<Lookup> {
        let trimmed = word.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation(
                "word must be a non-empty string".to_string(),
            ));
        }

        let key = CacheKey::for_word(word);
        if let Some(details) = self.cache.get(key.as_str()) {
            tracing::debug!(key = %key, "cache hit");
            return Ok(Lookup {
                details,
                cached: true,
            });
        }
        tracing::debug!(key = %key, "cache miss, querying provider");

        let prompt = word_details_prompt(trimmed);
        let raw = retry_with_backoff(self.retry, || self.provider.generate(&prompt))
            .await
            .map_err(wrap_provider_failure)?;

        let details = parse_word_details(&raw)?;
        self.cache
            .set_with_ttl(key.as_str(), details.clone(), self.cache_ttl);
        Ok(Lookup {
            details,
            cached: false,
        })
    }
}

/// Terminal provider failures become a lookup failure with a user-facing
/// message; quota exhaustion is called out distinctly. The source error is
/// preserved for logs.
fn wrap_provider_failure(err: Error) -> Error {
    let message = if err.is_rate_limited() {
        "Quota exceeded. Check your Gemini API quota or try again later.".to_string()
    } else {
        format!("Failed to get word details: {err}")
    };
    Error::Lookup {
        message,
        source: Some(Box::new(err)),
    }
}

/// Remove markdown code-fence wrapping the model tends to add despite
/// instructions, then trim.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Decode the provider's response text into [`WordDetails`]. A failure here
/// is terminal; nothing gets cached.
fn parse_word_details(raw: &str) -> Result<WordDetails> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned).map_err(|e| Error::Parse {
        message: e.to_string(),
    })
}
