//! Nearest-word suggestion for unknown dictionary queries.

use std::borrow::Cow;
use std::sync::Arc;

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::spelling::levenshtein::LevenshteinMatcher;
use crate::spelling::vocabulary::Vocabulary;

/// Edit distance bound used by the lookup workflow unless configured otherwise.
pub const DEFAULT_MAX_DISTANCE: usize = 3;

/// Candidates whose length differs from the query by more than this are skipped.
pub const MAX_LENGTH_DIFFERENCE: usize = 2;

/// A vocabulary word proposed for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// The suggested word.
    pub word: String,
    /// Edit distance from the query.
    pub distance: usize,
}

#[derive(Debug, Clone, Copy)]
struct Ranked {
    position: usize,
    distance: usize,
    same_length: bool,
}

impl Ranked {
    // Lower is better. Position keeps the parallel reduction equal to a
    // front-to-back scan where the first qualifying word wins.
    fn key(&self) -> (usize, bool, usize) {
        (self.distance, !self.same_length, self.position)
    }
}

/// Find the best candidate for `query` in `words`.
///
/// An exact (case-insensitive) entry wins outright. Otherwise only entries
/// sharing the query's first character and within [`MAX_LENGTH_DIFFERENCE`]
/// characters of its length are compared. The lowest distance wins; on a
/// tie a candidate with the query's length beats one without, and among
/// equals the earliest entry in `words` wins.
pub fn best_match(words: &[String], query: &str, max_distance: usize) -> Option<MatchCandidate> {
    let query = query.trim().to_lowercase();
    let matcher = LevenshteinMatcher::new(query);
    let first_char = matcher.first_char()?;

    if let Some(exact) = words
        .par_iter()
        .find_first(|word| lowercase(word) == matcher.query())
    {
        return Some(MatchCandidate {
            word: lowercase(exact).into_owned(),
            distance: 0,
        });
    }

    let best = words
        .par_iter()
        .enumerate()
        .filter_map(|(position, word)| {
            let word = lowercase(word);
            if word.chars().next() != Some(first_char) {
                return None;
            }

            let len = word.chars().count();
            if len.abs_diff(matcher.query_len()) > MAX_LENGTH_DIFFERENCE {
                return None;
            }

            let distance = matcher.distance_threshold(&word, max_distance)?;
            Some(Ranked {
                position,
                distance,
                same_length: len == matcher.query_len(),
            })
        })
        .min_by_key(Ranked::key)?;

    Some(MatchCandidate {
        word: lowercase(&words[best.position]).into_owned(),
        distance: best.distance,
    })
}

fn lowercase(word: &str) -> Cow<'_, str> {
    if word.chars().any(char::is_uppercase) {
        Cow::Owned(word.to_lowercase())
    } else {
        Cow::Borrowed(word)
    }
}

/// Suggests corrections against a shared, lazily loaded vocabulary.
#[derive(Debug, Clone)]
pub struct SpellingSuggester {
    vocabulary: Arc<Vocabulary>,
}

impl SpellingSuggester {
    /// Create a new suggester over the given vocabulary.
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        SpellingSuggester { vocabulary }
    }

    /// The vocabulary this suggester scans.
    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    /// Suggest the closest vocabulary word within `max_distance` edits.
    ///
    /// An unavailable or empty vocabulary yields `None` rather than an error.
    pub async fn suggest(&self, query: &str, max_distance: usize) -> Option<String> {
        self.suggest_candidate(query, max_distance)
            .await
            .map(|candidate| candidate.word)
    }

    /// Like [`SpellingSuggester::suggest`] but also reports the distance.
    pub async fn suggest_candidate(
        &self,
        query: &str,
        max_distance: usize,
    ) -> Option<MatchCandidate> {
        if query.trim().is_empty() {
            return None;
        }

        let words = self.vocabulary.words().await?;
        // The scan covers the whole word list; keep it off the async workers.
        let scan_query = query.to_string();
        let candidate = tokio::task::spawn_blocking(move || {
            best_match(&words, &scan_query, max_distance)
        })
        .await
        .unwrap_or_else(|e| {
            warn!("suggestion scan for {query:?} failed: {e}");
            None
        });
        debug!("suggestion for {query:?}: {candidate:?}");
        candidate
    }
}
