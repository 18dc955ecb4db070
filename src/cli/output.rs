//! Output formatting for CLI commands.

use std::io::{self, IsTerminal, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{CairnArgs, OutputFormat};
use crate::dictionary::highlight::Highlighter;
use crate::dictionary::lookup::LookupReport;
use crate::dictionary::render::{render_etymology, render_report};
use crate::error::Result;
use crate::etymology::ReconciledEtymology;

/// Result structure for spelling suggestions.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub query: String,
    pub suggestion: Option<String>,
    pub distance: Option<usize>,
}

/// Result structure for etymology lookups.
#[derive(Debug, Serialize)]
pub struct EtymologyResult {
    pub word: String,
    pub etymology: ReconciledEtymology,
}

/// Result structure for the history listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResult {
    pub words: Vec<String>,
}

/// Whether human output should use ANSI colors.
pub fn stdout_is_terminal() -> bool {
    io::stdout().is_terminal()
}

/// Output a lookup report in the selected format.
pub fn output_lookup(report: &LookupReport, previous: &[String], args: &CairnArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            let mut out = io::stdout().lock();
            render_report(&mut out, report, previous, stdout_is_terminal())?;
            out.flush()?;
            Ok(())
        }
        OutputFormat::Json => output_json(report, args),
    }
}

/// Output an etymology in the selected format.
pub fn output_etymology(result: &EtymologyResult, args: &CairnArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            let mut out = io::stdout().lock();
            if result.etymology.is_empty() && result.etymology.example.is_none() {
                writeln!(out, "No etymology found for {:?}.", result.word)?;
            } else {
                let highlighter =
                    Highlighter::new([result.word.as_str()], Vec::<String>::new(), stdout_is_terminal());
                write!(out, "{}", result.word)?;
                render_etymology(&mut out, &result.etymology, &highlighter)?;
            }
            out.flush()?;
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output a spelling suggestion in the selected format.
pub fn output_suggestion(result: &SuggestionResult, args: &CairnArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            match (&result.suggestion, result.distance) {
                (Some(word), Some(0)) => println!("{word}"),
                (Some(word), Some(distance)) if args.verbosity() > 1 => {
                    println!("Did you mean: {word}? (distance {distance})")
                }
                (Some(word), _) => println!("Did you mean: {word}?"),
                (None, _) => println!("No suggestion for {:?}.", result.query),
            }
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output the history listing in the selected format.
pub fn output_history(result: &HistoryResult, args: &CairnArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if result.words.is_empty() {
                if args.verbosity() > 0 {
                    println!("No words looked up yet.");
                }
            } else {
                for word in &result.words {
                    println!("{word}");
                }
            }
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &CairnArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}
