//! # Cairn
//!
//! A command-line dictionary with typo correction and reconciled etymologies.
//!
//! ## Features
//!
//! - Definitions from the Free Dictionary API
//! - Spelling suggestions for unknown words by bounded edit distance
//! - Etymologies merged from a primary summary source and Wiktionary markup
//! - Highlighting of the current and recently looked-up words
//! - Lookup history and TOML configuration

pub mod cli;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod etymology;
pub mod source;
pub mod spelling;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
