//! Human-readable rendering of lookup results.

use std::io::{self, Write};

use crate::dictionary::entry::DictionaryEntry;
use crate::dictionary::highlight::Highlighter;
use crate::dictionary::lookup::{EntryReport, LookupReport};
use crate::etymology::ReconciledEtymology;

/// Write a whole lookup report.
///
/// `previous` are recently looked-up words, highlighted apart from the
/// entry's own headword.
pub fn render_report<W: Write>(
    out: &mut W,
    report: &LookupReport,
    previous: &[String],
    color: bool,
) -> io::Result<()> {
    if let Some(notice) = report.correction_notice() {
        writeln!(out, "{notice}")?;
        writeln!(out)?;
    }
    for entry in &report.entries {
        let highlighter = Highlighter::new([entry.entry.headword()], previous, color);
        render_entry(out, entry, &highlighter)?;
    }
    Ok(())
}

/// Write one entry: headword, etymology, meanings and collected examples.
pub fn render_entry<W: Write>(
    out: &mut W,
    report: &EntryReport,
    highlighter: &Highlighter,
) -> io::Result<()> {
    let entry = &report.entry;
    write!(out, "\n{}", entry.headword())?;
    let phonetics = entry.phonetic_texts();
    if phonetics.is_empty() {
        writeln!(out)?;
    } else {
        writeln!(out, "  {}", phonetics.join(" "))?;
    }

    render_etymology(out, &report.etymology, highlighter)?;
    render_meanings(out, entry, highlighter)?;

    let examples = entry.unique_examples();
    if !examples.is_empty() {
        writeln!(out, "\n  Examples:")?;
        for example in examples {
            writeln!(out, "    • {}", highlighter.highlight(example))?;
        }
    }
    Ok(())
}

/// Write the etymology block and the usage example, if any.
pub fn render_etymology<W: Write>(
    out: &mut W,
    etymology: &ReconciledEtymology,
    highlighter: &Highlighter,
) -> io::Result<()> {
    if !etymology.is_empty() {
        writeln!(out, "\n  Etymology:")?;
        for line in etymology.text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            writeln!(out, "    {}", highlighter.highlight(line))?;
        }
        if let Some(url) = etymology.full_entry.as_deref().filter(|_| etymology.truncated) {
            writeln!(out, "    (Full entry: {url})")?;
        }
    }
    if let Some(example) = &etymology.example {
        writeln!(out, "\n  Example: {}", highlighter.highlight(example))?;
    }
    Ok(())
}

fn render_meanings<W: Write>(
    out: &mut W,
    entry: &DictionaryEntry,
    highlighter: &Highlighter,
) -> io::Result<()> {
    for meaning in &entry.meanings {
        writeln!(out, "\n  [{}]", meaning.part_of_speech)?;
        for (i, definition) in meaning.definitions.iter().enumerate() {
            writeln!(
                out,
                "    {}. {}",
                i + 1,
                highlighter.highlight(&definition.definition)
            )?;
            let example = definition.example.trim();
            if !example.is_empty() {
                let quoted = if example.starts_with('"') || example.starts_with('\'') {
                    example.to_string()
                } else {
                    format!("\"{example}\"")
                };
                writeln!(out, "       Example: {}", highlighter.highlight(&quoted))?;
            }
        }
        if !meaning.synonyms.is_empty() {
            let synonyms = meaning.synonyms.join(", ");
            writeln!(out, "    Synonyms: {}", highlighter.highlight(&synonyms))?;
        }
        if !meaning.antonyms.is_empty() {
            let antonyms = meaning.antonyms.join(", ");
            writeln!(out, "    Antonyms: {}", highlighter.highlight(&antonyms))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dictionary::entry::{Definition, Meaning, Phonetic};

    fn report(etymology: ReconciledEtymology) -> LookupReport {
        let entry = DictionaryEntry {
            word: "Spin".to_string(),
            phonetics: vec![Phonetic {
                text: "/spɪn/".to_string(),
                audio: String::new(),
            }],
            meanings: vec![Meaning {
                part_of_speech: "verb".to_string(),
                definitions: vec![
                    Definition {
                        definition: "To rotate.".to_string(),
                        example: "Wheels spin.".to_string(),
                        ..Default::default()
                    },
                    Definition {
                        definition: "To twist fibres into thread.".to_string(),
                        example: "Wheels spin.".to_string(),
                        ..Default::default()
                    },
                ],
                synonyms: vec!["turn".to_string(), "whirl".to_string()],
                antonyms: Vec::new(),
            }],
        };
        LookupReport {
            query: "spinn".to_string(),
            corrected_to: Some("spin".to_string()),
            entries: vec![EntryReport { entry, etymology }],
        }
    }

    fn render(report: &LookupReport, previous: &[String]) -> String {
        let mut out = Vec::new();
        render_report(&mut out, report, previous, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_report() {
        let etymology = ReconciledEtymology {
            text: "From Old English spinnan.".to_string(),
            example: Some("She likes to turn.".to_string()),
            ..Default::default()
        };
        let text = render(&report(etymology), &["turn".to_string()]);

        let expected = "Word not found. Did you mean: spin?\n\
            \n\
            \nspin  /spɪn/\n\
            \n  Etymology:\n\
            \x20   From Old English spinnan.\n\
            \n  Example: She likes to **turn**.\n\
            \n  [verb]\n\
            \x20   1. To rotate.\n\
            \x20      Example: \"Wheels **spin**.\"\n\
            \x20   2. To twist fibres into thread.\n\
            \x20      Example: \"Wheels **spin**.\"\n\
            \x20   Synonyms: **turn**, whirl\n\
            \n  Examples:\n\
            \x20   • Wheels **spin**.\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_truncated_etymology_points_to_full_entry() {
        let etymology = ReconciledEtymology {
            text: "from Old English…".to_string(),
            truncated: true,
            full_entry: Some("https://www.etymonline.com/word/spin".to_string()),
            ..Default::default()
        };
        let text = render(&report(etymology), &[]);
        assert!(text.contains("    from Old English…\n    (Full entry: https://www.etymonline.com/word/spin)\n"));
    }

    #[test]
    fn test_empty_etymology_is_omitted() {
        let text = render(&report(ReconciledEtymology::default()), &[]);
        assert!(!text.contains("Etymology:"));
        assert!(!text.contains("\n  Example: "));
    }
}
