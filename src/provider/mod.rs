//! AI provider abstraction and the Gemini implementation.
//!
//! The lookup orchestration talks to [`LookupProvider`], an object-safe
//! trait, so the provider can be swapped (or stubbed in tests) without
//! touching cache or retry logic. [`GeminiClient`] is the production
//! implementation over Google's `generateContent` API.

mod gemini;

use async_trait::async_trait;
use serde::Serialize;

use crate::Result;

pub use gemini::{GeminiClient, GeminiConfig};

/// A provider that can answer a free-text generation prompt.
///
/// Implementations map their own failure shapes into [`crate::Error`]
/// (notably `Error::Remote` with rate-limit classification) so callers can
/// retry without knowing the provider's error schema.
#[async_trait]
pub trait LookupProvider: Send + Sync {
    /// Run one generation request and return the raw response text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// A generation-capable model as reported by the provider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Short model id, e.g. `gemma-3-12b-it`.
    pub name: String,
    /// Provider-qualified name, e.g. `models/gemma-3-12b-it`.
    pub full_name: String,
    pub display_name: String,
    pub description: String,
    pub supported_methods: Vec<String>,
    pub input_token_limit: Option<u64>,
    pub output_token_limit: Option<u64>,
    pub version: String,
}
