//! Remote sources consumed by the lookup workflow.
//!
//! Each source is a trait so the spelling and etymology components can be
//! driven by in-memory fakes in tests and by the HTTP clients in
//! [`dictionary_api`], [`etymonline`], [`wiktionary`] and [`word_list`] in
//! the binary.

pub mod dictionary_api;
pub mod etymonline;
pub mod http;
pub mod wiktionary;
pub mod word_list;

use async_trait::async_trait;

use crate::dictionary::entry::DictionaryResponse;
use crate::error::Result;

pub use dictionary_api::DictionaryApiSource;
pub use etymonline::EtymonlineSource;
pub use wiktionary::WiktionarySource;
pub use word_list::{FileWordList, HttpWordList};

/// Bulk word list used as the spelling reference vocabulary.
#[async_trait]
pub trait VocabularySource: Send + Sync {
    /// Fetch every word of the list, in source order.
    async fn fetch_words(&self) -> Result<Vec<String>>;
}

/// A document served by the primary etymology source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryDocument {
    /// The headword the source actually served, after any redirect.
    pub resolved_headword: String,
    /// Raw document text (HTML).
    pub raw_text: String,
}

impl PrimaryDocument {
    pub fn new(resolved_headword: impl Into<String>, raw_text: impl Into<String>) -> Self {
        PrimaryDocument {
            resolved_headword: resolved_headword.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// Primary etymology source (short, authoritative summaries).
#[async_trait]
pub trait PrimaryEtymologySource: Send + Sync {
    /// Fetch whatever document the source serves for `word`.
    async fn fetch_document(&self, word: &str) -> Result<PrimaryDocument>;

    /// Link to the full entry for `word`, shown when the summary is truncated.
    fn entry_url(&self, word: &str) -> Option<String> {
        let _ = word;
        None
    }
}

/// Secondary etymology source (raw wiki markup).
#[async_trait]
pub trait SecondaryEtymologySource: Send + Sync {
    /// Fetch the raw markup for `word`; `None` when the page does not exist.
    async fn fetch_markup(&self, word: &str) -> Result<Option<String>>;
}

/// Dictionary definitions source.
#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// Look up the definitions of `word`.
    async fn lookup(&self, word: &str) -> Result<DictionaryResponse>;
}
