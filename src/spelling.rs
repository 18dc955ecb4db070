//! Typo correction for dictionary lookups.
//!
//! When the dictionary has no entry for a query, the [`SpellingSuggester`]
//! proposes the closest word of a large reference vocabulary by bounded
//! Levenshtein distance, after cheap first-character and length filters.

pub mod levenshtein;
pub mod suggest;
pub mod vocabulary;

// Re-export commonly used types
pub use levenshtein::*;
pub use suggest::*;
pub use vocabulary::*;
