//! Dictionary lookups.
//!
//! [`Lookup`] ties the dictionary source, the spelling suggester and the
//! etymology reconciler together; [`render`] turns its reports into text.

pub mod entry;
pub mod highlight;
pub mod history;
pub mod lookup;
pub mod render;

pub use entry::*;
pub use highlight::{Emphasis, Highlighter, base_forms};
pub use history::{History, HistoryRecord};
pub use lookup::{EntryReport, Lookup, LookupReport};
