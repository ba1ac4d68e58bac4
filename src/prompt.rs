//! Prompt construction for the word-details request.

/// Build the single instruction sent to the provider for a word lookup.
///
/// The provider is asked to answer with bare JSON matching the exact field
/// names [`crate::types::WordDetails`] deserializes, with meanings and
/// translations in Thai. Models still wrap the object in markdown fences
/// often enough that the response parser strips them anyway.
pub fn word_details_prompt(word: &str) -> String {
    format!(
        r#"You are an expert English teacher and vocabulary specialist.
I need you to provide detailed information about the English word: "{word}"

Please provide the following information in JSON format:

1. **Type** (ประเภทคำ): Provide the part of speech/word type of this word (e.g., "noun", "verb", "adjective", "adverb", "preposition", "conjunction", "pronoun", "interjection", "determiner").
   - Use standard abbreviations if applicable (e.g., "n." for noun, "v." for verb, "adj." for adjective, "adv." for adverb)
   - Format: String

2. **Meaning** (ความหมาย): Provide a clear and concise meaning of the word in Thai language.
   - If the word has multiple meanings, provide the most common/useful meaning.
   - Format: Plain text in Thai

3. **Usage Examples** (ตัวอย่างการใช้งาน): Provide 2-3 example sentences showing how to use this word.
   - Each example should be practical and easy to understand.
   - Format: Array of objects with:
     - "sentence": The example sentence in English
     - "translation": The Thai translation of the sentence

4. **Synonyms** (คำพ้องความหมาย): Provide 2-3 synonyms (words with similar meaning).
   - Format: Array of strings
   - For each synonym, include the word type in parentheses after the word (e.g., "happy (adj.)", "joy (n.)")

5. **Antonyms** (คำตรงข้าม): Provide 1-2 antonyms (words with opposite meaning) if applicable.
   - If there are no clear antonyms, return an empty array.
   - Format: Array of strings
   - For each antonym, include the word type in parentheses after the word (e.g., "sad (adj.)", "sorrow (n.)")

6. **Word Form Variations** (รูปคำที่เกี่ยวข้อง): Provide related word forms (noun, verb, adjective, adverb, etc.)
   - For example, if the word is "happy", provide: happiness (noun), happily (adverb)
   - Format: Array of objects with:
     - "form": The word form (e.g., "noun", "verb", "adjective", "adverb")
     - "word": The actual word

7. **Common Phrases** (วลีที่ใช้บ่อย): Provide 1-2 common phrases or idioms that use this word.
   - Format: Array of objects with:
     - "phrase": The phrase in English
     - "meaning": The meaning in Thai

IMPORTANT:
- All Thai text should be in proper Thai language.
- Keep responses concise but informative.
- If any field is not applicable or cannot be determined, use null or empty array.
- Return ONLY valid JSON, do not include any markdown formatting, code blocks, or additional text.

Return the response as a JSON object with these exact field names:
{{
  "type": string,
  "meaning": string,
  "usageExamples": [
    {{
      "sentence": string,
      "translation": string
    }}
  ],
  "synonyms": string[],
  "antonyms": string[],
  "wordFormVariations": [
    {{
      "form": string,
      "word": string
    }}
  ],
  "commonPhrases": [
    {{
      "phrase": string,
      "meaning": string
    }}
  ]
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_the_word() {
        let prompt = word_details_prompt("resilient");
        assert!(prompt.contains("\"resilient\""));
    }

    #[test]
    fn test_prompt_names_every_wire_field() {
        let prompt = word_details_prompt("happy");
        for field in [
            "\"type\"",
            "\"meaning\"",
            "usageExamples",
            "synonyms",
            "antonyms",
            "wordFormVariations",
            "commonPhrases",
        ] {
            assert!(prompt.contains(field), "prompt should mention {field}");
        }
    }
}
