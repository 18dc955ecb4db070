//! Extraction from the secondary source's wiki markup.
//!
//! A page holds one level-2 section per language. Inside the target
//! language's section every `Etymology` / `Etymology N` subsection is cleaned
//! and joined, and a usage example is picked from the section's templates,
//! quotations or definition examples.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::etymology::markup::{clean_etymology_markup, clean_example_markup};

/// Passage quotations longer than this are shortened.
const MAX_PASSAGE_CHARS: usize = 300;
/// Definition examples longer than this are shortened.
const MAX_DEFINITION_EXAMPLE_CHARS: usize = 280;
/// Definition examples must be longer than this to be used.
const MIN_DEFINITION_EXAMPLE_CHARS: usize = 20;

lazy_static! {
    static ref ETYMOLOGY_TITLE: Regex = Regex::new(r"^Etymology(?:\s+\d+)?$").unwrap();
    static ref USAGE_EXAMPLE: Regex =
        Regex::new(r"\{\{uxi?\|(?P<lang>[^|{}]*)\|(?P<text>[^|{}]+)(?:\|[^{}]*)?\}\}").unwrap();
    static ref PASSAGE: Regex = Regex::new(r"\|passage=([^|}]+)(?:\|[^}]*)?\}\}").unwrap();
    static ref DEFINITION_EXAMPLE: Regex = Regex::new(r"(?m)^#:[ \t]*(.+)$").unwrap();
}

/// The language whose section is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLanguage {
    /// Section heading, e.g. `English`.
    pub name: String,
    /// Template language code, e.g. `en`.
    pub code: String,
}

impl TargetLanguage {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        TargetLanguage {
            name: name.into(),
            code: code.into(),
        }
    }
}

impl Default for TargetLanguage {
    fn default() -> Self {
        TargetLanguage::new("English", "en")
    }
}

/// Everything taken from one secondary page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecondaryExtraction {
    pub etymology: Option<String>,
    pub example: Option<String>,
}

/// Extract the etymology and usage example from a page.
pub fn extract_secondary(markup: &str, language: &TargetLanguage) -> SecondaryExtraction {
    let text = normalize_line_endings(markup);
    SecondaryExtraction {
        etymology: etymology_from(&text, language),
        example: example_from(&text, language),
    }
}

/// Extract the cleaned etymology of `language` from a page.
///
/// Without a section for the language only the first etymology subsection of
/// the page is used.
pub fn extract_etymology(markup: &str, language: &TargetLanguage) -> Option<String> {
    etymology_from(&normalize_line_endings(markup), language)
}

/// Extract a usage example from the section of `language`.
pub fn extract_example(markup: &str, language: &TargetLanguage) -> Option<String> {
    example_from(&normalize_line_endings(markup), language)
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn etymology_from(text: &str, language: &TargetLanguage) -> Option<String> {
    let sections = match language_section(text, &language.name) {
        Some(section) => etymology_sections(section),
        None => etymology_sections(text).into_iter().take(1).collect(),
    };

    let parts: Vec<String> = sections
        .into_iter()
        .map(clean_etymology_markup)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

fn example_from(text: &str, language: &TargetLanguage) -> Option<String> {
    let section = language_section(text, &language.name)?;

    let raw = usage_example(section, &language.code)
        .or_else(|| passage(section))
        .or_else(|| definition_example(section))?;

    let example = clean_example_markup(&raw);
    if example.is_empty() {
        None
    } else {
        Some(example)
    }
}

fn usage_example(section: &str, code: &str) -> Option<String> {
    USAGE_EXAMPLE
        .captures_iter(section)
        .find(|caps| caps["lang"].trim() == code)
        .map(|caps| caps["text"].to_string())
}

fn passage(section: &str) -> Option<String> {
    let caps = PASSAGE.captures(section)?;
    Some(shorten(&caps[1], MAX_PASSAGE_CHARS))
}

fn definition_example(section: &str) -> Option<String> {
    DEFINITION_EXAMPLE
        .captures_iter(section)
        .map(|caps| {
            let line = caps.get(1).map_or("", |m| m.as_str()).trim();
            match line.find("{{") {
                Some(idx) => line[..idx].trim().to_string(),
                None => line.to_string(),
            }
        })
        .find(|example| example.chars().count() > MIN_DEFINITION_EXAMPLE_CHARS)
        .map(|example| shorten(&example, MAX_DEFINITION_EXAMPLE_CHARS))
}

/// Cut `text` to `max` characters, the last three being `...`.
fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max - 3).collect();
    short.push_str("...");
    short
}

/// Parse a `==Title==` heading line into its level and title.
fn heading(line: &str) -> Option<(usize, &str)> {
    let line = line.trim_end();
    let leading = line.chars().take_while(|&c| c == '=').count();
    let trailing = line.chars().rev().take_while(|&c| c == '=').count();
    if leading < 2 || trailing < 2 || line.len() <= leading + trailing {
        return None;
    }
    let level = leading.min(trailing);
    let title = line[level..line.len() - level].trim_matches('=').trim();
    if title.is_empty() {
        None
    } else {
        Some((level, title))
    }
}

/// Lines of `text` with the byte offset where each starts.
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line))
    })
}

/// Body of the level-2 section titled `name`, up to the next level-2 heading.
fn language_section<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let mut start = None;
    for (offset, line) in lines_with_offsets(text) {
        let Some((level, title)) = heading(line) else {
            continue;
        };
        match start {
            None if level == 2 && title == name => start = Some(offset + line.len()),
            Some(begin) if level <= 2 => return Some(&text[begin..offset]),
            _ => {}
        }
    }
    start.map(|begin| &text[begin..])
}

/// Bodies of every etymology subsection, each up to the next heading.
fn etymology_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut open = None;
    for (offset, line) in lines_with_offsets(text) {
        let Some((_, title)) = heading(line) else {
            continue;
        };
        if let Some(begin) = open.take() {
            sections.push(&text[begin..offset]);
        }
        if ETYMOLOGY_TITLE.is_match(title) {
            open = Some(offset + line.len());
        }
    }
    if let Some(begin) = open {
        sections.push(&text[begin..]);
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "==English==\r\n\
        ===Etymology 1===\r\n\
        From {{inh|en|enm|turnen}}, from {{inh|en|ang|turnian}}.\r\n\
        \r\n\
        ===Etymology 2===\r\n\
        From {{bor|en|fro|torner}}.\r\n\
        ====Verb====\r\n\
        {{en-verb}}\r\n\
        # To rotate.\r\n\
        #: {{ux|en|'''Turn''' the [[wheel]] slowly.}}\r\n\
        \r\n\
        ==French==\r\n\
        ===Etymology===\r\n\
        From {{inh|fr|fro|tourner}}.\r\n\
        ====Verb====\r\n\
        # To turn.\r\n\
        #: {{ux|fr|Tourne la roue.}}\r\n";

    #[test]
    fn test_heading() {
        assert_eq!(heading("==English=="), Some((2, "English")));
        assert_eq!(heading("=== Etymology 2 ===  \n"), Some((3, "Etymology 2")));
        assert_eq!(heading("====Verb===="), Some((4, "Verb")));
        assert_eq!(heading("# definition"), None);
        assert_eq!(heading("===="), None);
        assert_eq!(heading("a == b"), None);
    }

    #[test]
    fn test_language_section_stops_at_next_language() {
        let text = normalize_line_endings(PAGE);
        let section = language_section(&text, "English").unwrap();
        assert!(section.contains("turnen"));
        assert!(section.contains("====Verb===="));
        assert!(!section.contains("French"));
        assert!(language_section(&text, "German").is_none());
    }

    #[test]
    fn test_extract_etymology_joins_sections() {
        let etymology = extract_etymology(PAGE, &TargetLanguage::default()).unwrap();
        assert_eq!(
            etymology,
            "From Middle English turnen, from Old English turnian.\n\nFrom Old French torner."
        );
    }

    #[test]
    fn test_extract_etymology_other_language() {
        let french = TargetLanguage::new("French", "fr");
        assert_eq!(
            extract_etymology(PAGE, &french).as_deref(),
            Some("From Old French tourner.")
        );
        assert_eq!(
            extract_example(PAGE, &french).as_deref(),
            Some("Tourne la roue.")
        );
    }

    #[test]
    fn test_fallback_uses_first_etymology_only() {
        let page = "==Translingual==\n===Etymology 1===\nFrom {{der|mul|la|a}}.\n===Etymology 2===\nFrom b.\n";
        assert_eq!(
            extract_etymology(page, &TargetLanguage::default()).as_deref(),
            Some("From Latin a.")
        );
    }

    #[test]
    fn test_section_without_etymology() {
        let page = "==English==\n===Noun===\n# A thing.\n==Latin==\n===Etymology===\nFrom x.\n";
        assert_eq!(extract_etymology(page, &TargetLanguage::default()), None);
    }

    #[test]
    fn test_usage_example_template() {
        assert_eq!(
            extract_example(PAGE, &TargetLanguage::default()).as_deref(),
            Some("Turn the wheel slowly.")
        );
    }

    #[test]
    fn test_usage_example_ignores_other_languages() {
        let page = "==English==\n# x\n#: {{uxi|de|Das ist gut.}}\n#: {{uxi|en|That is good.}}\n";
        assert_eq!(
            extract_example(page, &TargetLanguage::default()).as_deref(),
            Some("That is good.")
        );
    }

    #[test]
    fn test_usage_example_beats_earlier_passage() {
        let page = "==English==\n# A turn.\n\
                    #* {{quote-book|en|year=1900|passage=The passage text.}}\n\
                    #: The definition example sits here as well.\n\
                    #: {{ux|en|The usage example.}}\n";
        assert_eq!(
            extract_example(page, &TargetLanguage::default()).as_deref(),
            Some("The usage example.")
        );
    }

    #[test]
    fn test_passage_beats_earlier_definition_example() {
        let page = "==English==\n# A turn.\n\
                    #: The definition example comes first here.\n\
                    #* {{quote-book|en|year=1900|passage=The passage text.}}\n";
        assert_eq!(
            extract_example(page, &TargetLanguage::default()).as_deref(),
            Some("The passage text.")
        );
    }

    #[test]
    fn test_passage_example_is_capped() {
        let passage = "a".repeat(400);
        let page = format!("==English==\n#* {{{{quote-book|en|year=1900|passage={passage}}}}}\n");
        let example = extract_example(&page, &TargetLanguage::default()).unwrap();
        assert_eq!(example.chars().count(), 300);
        assert!(example.ends_with("..."));
    }

    #[test]
    fn test_definition_example() {
        let page = "==English==\n# A thing.\n#: short one\n#: The [[cat]] sat on the '''mat''' all day. {{gloss|x}}\n";
        assert_eq!(
            extract_example(page, &TargetLanguage::default()).as_deref(),
            Some("The cat sat on the mat all day.")
        );
    }

    #[test]
    fn test_definition_example_is_capped() {
        let page = format!("==English==\n#: {}\n", "word ".repeat(100));
        let example = extract_example(&page, &TargetLanguage::default()).unwrap();
        assert_eq!(example.chars().count(), 280);
        assert!(example.ends_with("..."));
    }

    #[test]
    fn test_no_language_section_no_example() {
        let page = "==French==\n#: {{ux|en|An English sentence here.}}\n";
        assert_eq!(extract_example(page, &TargetLanguage::default()), None);
    }

    #[test]
    fn test_extract_secondary() {
        let extraction = extract_secondary(PAGE, &TargetLanguage::default());
        assert!(extraction.etymology.unwrap().starts_with("From Middle English"));
        assert_eq!(extraction.example.as_deref(), Some("Turn the wheel slowly."));
    }

    #[test]
    fn test_shorten_counts_characters() {
        assert_eq!(shorten("abc", 5), "abc");
        assert_eq!(shorten("ééééééé", 5), "éé...");
    }
}
