//! Wire types for AI-generated word details.

use serde::{Deserialize, Deserializer, Serialize};

/// Structured description of an English word as returned by the provider.
///
/// Every field is guaranteed to be populated after deserialization: a field
/// the provider omits *or* sends as an explicit `null` collapses to an empty
/// string/list. Consumers never see a partially-absent shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDetails {
    /// Part of speech, e.g. "n." or "adjective". May be empty.
    #[serde(rename = "type", default, deserialize_with = "null_to_default")]
    pub word_type: String,

    /// Meaning in the learner's language.
    #[serde(default, deserialize_with = "null_to_default")]
    pub meaning: String,

    /// Example sentences with translations, in presentation order.
    #[serde(default, deserialize_with = "null_to_default")]
    pub usage_examples: Vec<UsageExample>,

    #[serde(default, deserialize_with = "null_to_default")]
    pub synonyms: Vec<String>,

    #[serde(default, deserialize_with = "null_to_default")]
    pub antonyms: Vec<String>,

    /// Related word forms, e.g. happy -> happiness (noun), happily (adverb).
    #[serde(default, deserialize_with = "null_to_default")]
    pub word_form_variations: Vec<WordForm>,

    /// Common phrases or idioms using the word.
    #[serde(default, deserialize_with = "null_to_default")]
    pub common_phrases: Vec<Phrase>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageExample {
    #[serde(default, deserialize_with = "null_to_default")]
    pub sentence: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub translation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordForm {
    #[serde(default, deserialize_with = "null_to_default")]
    pub form: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub word: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phrase {
    #[serde(default, deserialize_with = "null_to_default")]
    pub phrase: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub meaning: String,
}

/// Deserialize `null` as `T::default()` instead of failing.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
