//! Etymology resolution.
//!
//! Two independent sources are consulted for every headword: a primary
//! source serving short summaries in HTML, and a secondary source serving
//! wiki markup. Each is reduced to plain prose and the
//! [`EtymologyReconciler`] picks one under a fixed precedence rule.

pub mod markup;
pub mod primary;
pub mod reconcile;
pub mod secondary;

pub use markup::{MarkupRule, clean_etymology_markup, clean_example_markup, language_name};
pub use primary::extract_primary_etymology;
pub use reconcile::{EtymologyReconciler, EtymologySource, ReconciledEtymology, is_truncated, merge};
pub use secondary::{
    SecondaryExtraction, TargetLanguage, extract_etymology, extract_example, extract_secondary,
};
