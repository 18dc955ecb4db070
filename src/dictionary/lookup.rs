//! The dictionary lookup workflow.
//!
//! A lookup queries the dictionary source; if the word is unknown the
//! spelling suggester proposes a correction and the lookup is retried once
//! with that word. Each entry found is then given its reconciled etymology
//! and recorded in the history store.

use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;

use crate::dictionary::entry::{DictionaryEntry, DictionaryResponse};
use crate::dictionary::history::History;
use crate::error::{CairnError, Result};
use crate::etymology::{EtymologyReconciler, ReconciledEtymology};
use crate::source::DictionarySource;
use crate::spelling::{DEFAULT_MAX_DISTANCE, SpellingSuggester};

/// One dictionary entry with its etymology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    pub entry: DictionaryEntry,
    pub etymology: ReconciledEtymology,
}

/// Everything a lookup produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupReport {
    /// The normalized word that was asked for.
    pub query: String,
    /// The suggested word that was looked up instead, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_to: Option<String>,
    pub entries: Vec<EntryReport>,
}

impl LookupReport {
    /// The notice shown when the query was corrected.
    pub fn correction_notice(&self) -> Option<String> {
        self.corrected_to
            .as_ref()
            .map(|word| format!("Word not found. Did you mean: {word}?"))
    }

    /// Headword of the first entry, or the looked-up word.
    pub fn headword(&self) -> &str {
        self.entries
            .first()
            .map(|report| report.entry.word.as_str())
            .or(self.corrected_to.as_deref())
            .unwrap_or(&self.query)
    }
}

/// Looks words up and assembles [`LookupReport`]s.
pub struct Lookup {
    dictionary: Arc<dyn DictionarySource>,
    suggester: SpellingSuggester,
    reconciler: EtymologyReconciler,
    history: History,
    suggest: bool,
    max_distance: usize,
}

impl Lookup {
    pub fn new(
        dictionary: Arc<dyn DictionarySource>,
        suggester: SpellingSuggester,
        reconciler: EtymologyReconciler,
    ) -> Self {
        Lookup {
            dictionary,
            suggester,
            reconciler,
            history: History::disabled(),
            suggest: true,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }

    /// Record looked-up headwords in `history`.
    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    /// Enable or disable spelling suggestions for unknown words.
    pub fn with_suggestions(mut self, suggest: bool) -> Self {
        self.suggest = suggest;
        self
    }

    /// Set the largest edit distance a suggestion may have.
    pub fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Look up `word`.
    pub async fn run(&self, word: &str) -> Result<LookupReport> {
        let query = word.trim().to_lowercase();
        if query.is_empty() {
            return Err(CairnError::invalid_argument("no word provided"));
        }

        let (corrected_to, entries) = self.find_entries(&query).await?;

        let mut reports = Vec::with_capacity(entries.len());
        for entry in entries {
            let headword = entry.headword();
            let etymology = self.reconciler.resolve(&headword).await;
            self.record_history(&headword).await;
            reports.push(EntryReport { entry, etymology });
        }

        Ok(LookupReport {
            query,
            corrected_to,
            entries: reports,
        })
    }

    /// Record `headword` on a blocking thread; the store is a plain file.
    async fn record_history(&self, headword: &str) {
        let history = self.history.clone();
        let word = headword.to_string();
        if let Err(e) = tokio::task::spawn_blocking(move || history.record(&word)).await {
            warn!("could not record {headword:?} in history: {e}");
        }
    }

    /// Query the dictionary, retrying once with a suggested spelling.
    async fn find_entries(&self, query: &str) -> Result<(Option<String>, Vec<DictionaryEntry>)> {
        let message = match self.dictionary.lookup(query).await? {
            DictionaryResponse::Found(entries) => return Ok((None, non_empty(query, entries)?)),
            DictionaryResponse::NotFound { message } => message,
        };

        let suggestion = if self.suggest {
            self.suggester.suggest(query, self.max_distance).await
        } else {
            None
        };
        let Some(suggestion) = suggestion.filter(|word| word != query) else {
            debug!("no suggestion for {query:?}");
            return Err(not_found(query, message));
        };

        info!("{query:?} not found, looking up {suggestion:?} instead");
        match self.dictionary.lookup(&suggestion).await? {
            DictionaryResponse::Found(entries) => {
                let entries = non_empty(&suggestion, entries)?;
                Ok((Some(suggestion), entries))
            }
            DictionaryResponse::NotFound { message } => Err(not_found(&suggestion, message)),
        }
    }
}

impl std::fmt::Debug for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lookup")
            .field("suggester", &self.suggester)
            .field("reconciler", &self.reconciler)
            .field("history", &self.history)
            .field("suggest", &self.suggest)
            .field("max_distance", &self.max_distance)
            .finish_non_exhaustive()
    }
}

fn non_empty(word: &str, entries: Vec<DictionaryEntry>) -> Result<Vec<DictionaryEntry>> {
    if entries.is_empty() {
        Err(CairnError::not_found(format!("no definition for {word:?}")))
    } else {
        Ok(entries)
    }
}

fn not_found(word: &str, message: Option<String>) -> CairnError {
    CairnError::not_found(message.unwrap_or_else(|| format!("word not found: {word:?}")))
}
