//! Reference vocabulary for spelling suggestions.
//!
//! The vocabulary is fetched at most once per [`Vocabulary`] instance, no
//! matter how many tasks ask for it concurrently. The outcome of that single
//! load, success or failure, is what every caller observes afterwards.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::OnceCell;

use crate::source::VocabularySource;

type LoadOutcome = std::result::Result<Arc<[String]>, String>;

/// A lazily loaded, immutable word list shared by all lookups of a process.
pub struct Vocabulary {
    source: Option<Arc<dyn VocabularySource>>,
    cell: OnceCell<LoadOutcome>,
}

impl Vocabulary {
    /// Create a vocabulary that is fetched from `source` on first use.
    pub fn new(source: Arc<dyn VocabularySource>) -> Self {
        Vocabulary {
            source: Some(source),
            cell: OnceCell::new(),
        }
    }

    /// Create an already resident vocabulary from a list of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = normalize_words(words);
        Vocabulary {
            source: None,
            cell: OnceCell::new_with(Some(Ok(words))),
        }
    }

    /// Get the word list, loading it if this is the first request.
    ///
    /// Returns `None` when the load failed or produced no words.
    pub async fn words(&self) -> Option<Arc<[String]>> {
        let outcome = self.cell.get_or_init(|| self.load()).await;

        match outcome {
            Ok(words) if !words.is_empty() => Some(Arc::clone(words)),
            Ok(_) => {
                debug!("vocabulary is empty");
                None
            }
            Err(reason) => {
                debug!("vocabulary unavailable: {reason}");
                None
            }
        }
    }

    /// Whether a load has completed (successfully or not).
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    async fn load(&self) -> LoadOutcome {
        let Some(source) = &self.source else {
            return Ok(Arc::from(Vec::new()));
        };

        match source.fetch_words().await {
            Ok(words) => {
                let words = normalize_words(words);
                debug!("loaded {} vocabulary words", words.len());
                Ok(words)
            }
            Err(e) => {
                warn!("failed to load vocabulary: {e}");
                Err(e.to_string())
            }
        }
    }
}

impl std::fmt::Debug for Vocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vocabulary")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// Trim and lowercase words, dropping blanks. Source order is preserved.
pub fn normalize_words<I, S>(words: I) -> Arc<[String]>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .filter_map(|word| {
            let word = word.as_ref().trim();
            if word.is_empty() {
                None
            } else {
                Some(word.to_lowercase())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::error::{CairnError, Result};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl VocabularySource for CountingSource {
        async fn fetch_words(&self) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            if self.fail {
                Err(CairnError::other("word list offline"))
            } else {
                Ok(vec!["Apple".to_string(), "  ".to_string(), "banana".to_string()])
            }
        }
    }

    #[test]
    fn test_normalize_words() {
        let words = normalize_words(["Hello", " World ", "", "\t"]);
        assert_eq!(&*words, &["hello".to_string(), "world".to_string()]);
    }

    #[tokio::test]
    async fn test_from_words_is_resident() {
        let vocabulary = Vocabulary::from_words(["Zebra", "apple"]);
        assert!(vocabulary.is_initialized());

        let words = vocabulary.words().await.unwrap();
        assert_eq!(&*words, &["zebra".to_string(), "apple".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_vocabulary_yields_none() {
        let vocabulary = Vocabulary::from_words(Vec::<String>::new());
        assert!(vocabulary.words().await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_first_callers_load_once() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let vocabulary = Arc::new(Vocabulary::new(source.clone()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let vocabulary = Arc::clone(&vocabulary);
            handles.push(tokio::spawn(async move { vocabulary.words().await }));
        }
        for handle in handles {
            let words = handle.await.unwrap().unwrap();
            assert_eq!(&*words, &["apple".to_string(), "banana".to_string()]);
        }

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_shared_and_not_retried() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let vocabulary = Vocabulary::new(source.clone());

        assert!(vocabulary.words().await.is_none());
        assert!(vocabulary.words().await.is_none());
        assert!(vocabulary.is_initialized());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
