//! Dictionary entry model, as served by the Free Dictionary API.

use serde::{Deserialize, Serialize};

/// A phonetic transcription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phonetic {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub audio: String,
}

/// One sense of a word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

/// Definitions grouped by part of speech.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

/// A dictionary entry for one headword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

impl DictionaryEntry {
    /// The lowercase headword.
    pub fn headword(&self) -> String {
        self.word.trim().to_lowercase()
    }

    /// Non-empty phonetic transcriptions, in order.
    pub fn phonetic_texts(&self) -> Vec<&str> {
        self.phonetics
            .iter()
            .map(|p| p.text.as_str())
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// Every non-empty definition example, trimmed and de-duplicated.
    pub fn unique_examples(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for definition in self.meanings.iter().flat_map(|m| &m.definitions) {
            let example = definition.example.trim();
            if !example.is_empty() && !seen.contains(&example) {
                seen.push(example);
            }
        }
        seen
    }
}

/// Error body returned with a 404.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub resolution: String,
}

/// Outcome of a dictionary lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryResponse {
    /// The word has at least one entry.
    Found(Vec<DictionaryEntry>),
    /// The source has no entry; `message` is its explanation, when given.
    NotFound { message: Option<String> },
}
