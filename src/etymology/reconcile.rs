//! Reconciliation of the primary and secondary etymologies.

use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;

use crate::etymology::primary::extract_primary_etymology;
use crate::etymology::secondary::{TargetLanguage, extract_secondary};
use crate::source::{PrimaryEtymologySource, SecondaryEtymologySource};

/// The result of one source, after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EtymologySource {
    /// Short summary from the primary source.
    Primary { text: Option<String> },
    /// Full etymology and usage example from the secondary source.
    Secondary {
        text: Option<String>,
        example: Option<String>,
    },
}

impl EtymologySource {
    /// The extracted etymology text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            EtymologySource::Primary { text } | EtymologySource::Secondary { text, .. } => {
                text.as_deref()
            }
        }
    }

    /// The usage example; only the secondary source provides one.
    pub fn example(&self) -> Option<&str> {
        match self {
            EtymologySource::Primary { .. } => None,
            EtymologySource::Secondary { example, .. } => example.as_deref(),
        }
    }
}

/// The etymology shown for a headword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciledEtymology {
    /// Chosen etymology text; empty when neither source had one.
    pub text: String,
    /// Whether the text was cut short by its source.
    pub truncated: bool,
    /// Usage example from the secondary source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Link to the complete entry, set for truncated text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_entry: Option<String>,
    /// Non-fatal note when a source failed and nothing was resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl ReconciledEtymology {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Whether `text` ends with an ellipsis.
pub fn is_truncated(text: &str) -> bool {
    text.ends_with('…') || text.ends_with("...")
}

/// Merge the two extractions.
///
/// The secondary text wins when it is present and either the primary text is
/// missing or the secondary text is longer, counted in characters.
pub fn merge(
    primary: Option<&str>,
    secondary: Option<&str>,
    example: Option<&str>,
) -> ReconciledEtymology {
    let primary = primary.filter(|text| !text.is_empty());
    let secondary = secondary.filter(|text| !text.is_empty());

    let text = match (primary, secondary) {
        (None, Some(s)) => s,
        (Some(p), Some(s)) if s.chars().count() > p.chars().count() => s,
        (Some(p), _) => p,
        (None, None) => "",
    };

    ReconciledEtymology {
        text: text.to_string(),
        truncated: is_truncated(text),
        example: example.filter(|e| !e.is_empty()).map(str::to_string),
        full_entry: None,
        diagnostic: None,
    }
}

/// Resolves etymologies from a primary and a secondary source.
pub struct EtymologyReconciler {
    primary: Arc<dyn PrimaryEtymologySource>,
    secondary: Arc<dyn SecondaryEtymologySource>,
    language: TargetLanguage,
}

impl EtymologyReconciler {
    pub fn new(
        primary: Arc<dyn PrimaryEtymologySource>,
        secondary: Arc<dyn SecondaryEtymologySource>,
    ) -> Self {
        EtymologyReconciler {
            primary,
            secondary,
            language: TargetLanguage::default(),
        }
    }

    /// Read the secondary source's section for `language` instead of English.
    pub fn with_language(mut self, language: TargetLanguage) -> Self {
        self.language = language;
        self
    }

    pub fn language(&self) -> &TargetLanguage {
        &self.language
    }

    /// Resolve the etymology of `headword`.
    ///
    /// Both sources are fetched concurrently. A failing source counts as
    /// empty; when nothing is resolved the failure is kept as a diagnostic.
    pub async fn resolve(&self, headword: &str) -> ReconciledEtymology {
        let headword = headword.trim();
        if headword.is_empty() {
            return ReconciledEtymology::default();
        }

        let (primary, secondary) = tokio::join!(
            self.fetch_primary(headword),
            self.fetch_secondary(headword)
        );
        let (primary, primary_error) = primary;
        let (secondary, secondary_error) = secondary;
        debug!(
            "etymology of {headword:?}: primary {} chars, secondary {} chars",
            primary.text().map_or(0, |t| t.chars().count()),
            secondary.text().map_or(0, |t| t.chars().count()),
        );

        let mut reconciled = merge(primary.text(), secondary.text(), secondary.example());
        if reconciled.truncated {
            reconciled.full_entry = self.primary.entry_url(headword);
        }
        if reconciled.is_empty() {
            reconciled.diagnostic = secondary_error
                .or(primary_error)
                .map(|error| format!("Etymology unavailable: {error}"));
        }
        reconciled
    }

    async fn fetch_primary(&self, headword: &str) -> (EtymologySource, Option<String>) {
        match self.primary.fetch_document(headword).await {
            Ok(document) => {
                let text = extract_primary_etymology(headword, &document);
                if text.is_none() && !document.resolved_headword.is_empty() {
                    debug!(
                        "no primary etymology for {headword:?} (served {:?})",
                        document.resolved_headword
                    );
                }
                (EtymologySource::Primary { text }, None)
            }
            Err(e) => {
                warn!("primary etymology for {headword:?} failed: {e}");
                (EtymologySource::Primary { text: None }, Some(e.to_string()))
            }
        }
    }

    async fn fetch_secondary(&self, headword: &str) -> (EtymologySource, Option<String>) {
        match self.secondary.fetch_markup(headword).await {
            Ok(Some(markup)) => {
                let extraction = extract_secondary(&markup, &self.language);
                let source = EtymologySource::Secondary {
                    text: extraction.etymology,
                    example: extraction.example,
                };
                (source, None)
            }
            Ok(None) => {
                debug!("no secondary page for {headword:?}");
                (EtymologySource::Secondary { text: None, example: None }, None)
            }
            Err(e) => {
                warn!("secondary etymology for {headword:?} failed: {e}");
                let source = EtymologySource::Secondary { text: None, example: None };
                (source, Some(e.to_string()))
            }
        }
    }
}

impl std::fmt::Debug for EtymologyReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EtymologyReconciler")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::error::{CairnError, Result};
    use crate::source::PrimaryDocument;

    struct FixedPrimary(Option<PrimaryDocument>);

    #[async_trait]
    impl PrimaryEtymologySource for FixedPrimary {
        async fn fetch_document(&self, _word: &str) -> Result<PrimaryDocument> {
            self.0
                .clone()
                .ok_or_else(|| CairnError::other("primary offline"))
        }

        fn entry_url(&self, word: &str) -> Option<String> {
            Some(format!("https://primary.test/word/{word}"))
        }
    }

    struct FixedSecondary(Option<String>, bool);

    #[async_trait]
    impl SecondaryEtymologySource for FixedSecondary {
        async fn fetch_markup(&self, _word: &str) -> Result<Option<String>> {
            if self.1 {
                Err(CairnError::other("secondary offline"))
            } else {
                Ok(self.0.clone())
            }
        }
    }

    fn primary_page(word: &str, description: &str) -> Option<PrimaryDocument> {
        Some(PrimaryDocument::new(
            word,
            format!(r#"<meta name="description" content="{description} See origin and meaning of {word}.">"#),
        ))
    }

    fn reconciler(primary: Option<PrimaryDocument>, secondary: FixedSecondary) -> EtymologyReconciler {
        EtymologyReconciler::new(Arc::new(FixedPrimary(primary)), Arc::new(secondary))
    }

    #[test]
    fn test_merge_prefers_longer_secondary() {
        let p = "p".repeat(50);
        let s = "s".repeat(120);
        assert_eq!(merge(Some(p.as_str()), Some(s.as_str()), None).text, s);
        assert_eq!(merge(Some(s.as_str()), Some(p.as_str()), None).text, s);
    }

    #[test]
    fn test_merge_equal_length_keeps_primary() {
        let merged = merge(Some("abc"), Some("xyz"), Some("ex"));
        assert_eq!(merged.text, "abc");
        assert_eq!(merged.example.as_deref(), Some("ex"));
    }

    #[test]
    fn test_merge_single_source() {
        assert_eq!(merge(Some("from Latin"), None, None).text, "from Latin");
        assert_eq!(merge(None, Some("from Greek"), None).text, "from Greek");
        assert_eq!(merge(Some(""), Some("from Greek"), None).text, "from Greek");
    }

    #[test]
    fn test_merge_neither() {
        let merged = merge(None, None, None);
        assert_eq!(merged, ReconciledEtymology::default());
        assert!(!merged.truncated);
    }

    #[test]
    fn test_merge_counts_characters() {
        // 4 characters, 8 bytes
        let primary = "ēēēē";
        assert_eq!(merge(Some(primary), Some("abcde"), None).text, "abcde");
    }

    #[test]
    fn test_truncation_flag() {
        assert!(merge(Some("from Latin…"), None, None).truncated);
        assert!(merge(Some("from Latin..."), None, None).truncated);
        assert!(!merge(Some("from Latin."), None, None).truncated);
    }

    #[tokio::test]
    async fn test_resolve_both_sources() {
        let secondary = "==English==\n===Etymology===\nFrom {{inh|en|enm|vertigo}}, from {{der|en|la|vertigo}}, from {{der|en|la|vertere}}.\n===Noun===\n#: {{ux|en|Heights gave her '''vertigo'''.}}\n";
        let reconciler = reconciler(
            primary_page("vertigo", "vertigo: from Latin."),
            FixedSecondary(Some(secondary.to_string()), false),
        );

        let etymology = reconciler.resolve("vertigo").await;
        assert_eq!(
            etymology.text,
            "From Middle English vertigo, from Latin vertigo, from Latin vertere."
        );
        assert!(!etymology.truncated);
        assert_eq!(etymology.example.as_deref(), Some("Heights gave her vertigo."));
        assert_eq!(etymology.full_entry, None);
        assert_eq!(etymology.diagnostic, None);
    }

    #[tokio::test]
    async fn test_resolve_truncated_primary_links_full_entry() {
        let reconciler = reconciler(
            primary_page("vertigo", "vertigo: early 15c., from Latin…"),
            FixedSecondary(None, false),
        );

        let etymology = reconciler.resolve("vertigo").await;
        assert_eq!(etymology.text, "vertigo: early 15c., from Latin…");
        assert!(etymology.truncated);
        assert_eq!(
            etymology.full_entry.as_deref(),
            Some("https://primary.test/word/vertigo")
        );
    }

    #[tokio::test]
    async fn test_resolve_ignores_redirected_primary() {
        let reconciler = reconciler(
            primary_page("advert", "advert: short for advertisement"),
            FixedSecondary(None, false),
        );

        let etymology = reconciler.resolve("advertise").await;
        assert!(etymology.is_empty());
        assert_eq!(etymology.diagnostic, None);
    }

    #[tokio::test]
    async fn test_resolve_failures_are_not_errors() {
        let reconciler = reconciler(None, FixedSecondary(None, true));

        let etymology = reconciler.resolve("vertigo").await;
        assert!(etymology.is_empty());
        assert_eq!(
            etymology.diagnostic.as_deref(),
            Some("Etymology unavailable: Error: secondary offline")
        );
    }

    #[tokio::test]
    async fn test_resolve_one_failure_keeps_other_source() {
        let reconciler = reconciler(
            primary_page("vertigo", "from Latin."),
            FixedSecondary(None, true),
        );

        let etymology = reconciler.resolve("vertigo").await;
        assert_eq!(etymology.text, "from Latin.");
        assert_eq!(etymology.diagnostic, None);
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let reconciler = reconciler(
            primary_page("vertigo", "from Latin."),
            FixedSecondary(
                Some("==English==\n===Etymology===\nFrom {{der|en|la|vertigo}}, a whirling.\n".into()),
                false,
            ),
        );

        let first = reconciler.resolve("vertigo").await;
        let second = reconciler.resolve("vertigo").await;
        assert_eq!(first, second);
        assert_eq!(first.text, "From Latin vertigo, a whirling.");
    }

    #[tokio::test]
    async fn test_resolve_empty_headword() {
        let reconciler = reconciler(None, FixedSecondary(None, true));
        assert_eq!(reconciler.resolve("  ").await, ReconciledEtymology::default());
    }
}
