//! Wikitext cleanup rules.
//!
//! Etymology sections are turned into plain prose by applying an ordered list
//! of [`MarkupRule`]s. Order matters: language-tagged templates are resolved
//! before the catch-all template rule deletes whatever is left, and
//! self-closing citations are removed before paired ones so a paired match
//! cannot start at a self-closing tag.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, NoExpand, Regex};

/// Language codes resolved to names inside templates.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("enm", "Middle English"),
    ("ang", "Old English"),
    ("fro", "Old French"),
    ("frm", "Middle French"),
    ("fr", "French"),
    ("xno", "Anglo-Norman"),
    ("la", "Latin"),
    ("LL.", "Late Latin"),
    ("ML.", "Medieval Latin"),
    ("NL.", "New Latin"),
    ("grc", "Ancient Greek"),
    ("el", "Greek"),
    ("non", "Old Norse"),
    ("gem-pro", "Proto-Germanic"),
    ("gmw-pro", "Proto-West Germanic"),
    ("ine-pro", "Proto-Indo-European"),
    ("goh", "Old High German"),
    ("de", "German"),
    ("odt", "Old Dutch"),
    ("dum", "Middle Dutch"),
    ("nl", "Dutch"),
    ("it", "Italian"),
    ("es", "Spanish"),
    ("pt", "Portuguese"),
    ("ar", "Arabic"),
    ("fa", "Persian"),
    ("sa", "Sanskrit"),
    ("he", "Hebrew"),
];

/// Look up the display name of a language code.
pub fn language_name(code: &str) -> Option<&'static str> {
    let code = code.trim();
    LANGUAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
}

/// How a rule rewrites each match.
#[derive(Clone, Copy)]
pub enum Replacement {
    /// Replace the match with fixed text.
    Literal(&'static str),
    /// Build the replacement from the captures.
    Expand(fn(&Captures<'_>) -> String),
}

/// One pattern/replacement step of the cleanup pipeline.
pub struct MarkupRule {
    name: &'static str,
    pattern: Regex,
    replacement: Replacement,
    /// Re-apply until nothing matches (for nested constructs).
    repeat: bool,
}

impl MarkupRule {
    fn new(name: &'static str, pattern: &str, replacement: Replacement) -> Self {
        MarkupRule {
            name,
            pattern: Regex::new(pattern).expect("markup rule patterns are valid"),
            replacement,
            repeat: false,
        }
    }

    fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Name of the rule, for diagnostics and tests.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply this rule to `text`.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut output = self.apply_once(text);
        if self.repeat {
            while self.pattern.is_match(&output) {
                let next = self.apply_once(&output).into_owned();
                if next == *output {
                    break;
                }
                output = Cow::Owned(next);
            }
        }
        output
    }

    fn apply_once<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.replacement {
            Replacement::Literal(with) => self.pattern.replace_all(text, NoExpand(with)),
            Replacement::Expand(expand) => self
                .pattern
                .replace_all(text, |caps: &Captures<'_>| expand(caps)),
        }
    }
}

impl std::fmt::Debug for MarkupRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkupRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("repeat", &self.repeat)
            .finish()
    }
}

/// `"<Language> <term>"`, or the bare term for unknown codes.
fn labelled_term(code: &str, term: &str) -> String {
    let term = term.trim();
    let term = if term == "-" { "" } else { term };
    match (language_name(code), term.is_empty()) {
        (Some(name), true) => name.to_string(),
        (Some(name), false) => format!("{name} {term}"),
        (None, _) => term.to_string(),
    }
}

fn expand_language_term(caps: &Captures<'_>) -> String {
    let code = caps.name("lang").map_or("", |m| m.as_str());
    let term = caps.name("term").map_or("", |m| m.as_str());
    labelled_term(code, term)
}

fn expand_link(caps: &Captures<'_>) -> String {
    if let Some(text) = caps.name("text").filter(|m| !m.as_str().trim().is_empty()) {
        return text.as_str().to_string();
    }
    let target = caps.name("target").map_or("", |m| m.as_str());
    // Drop a "#Section" anchor from the target.
    target.split('#').next().unwrap_or_default().to_string()
}

lazy_static! {
    /// Rules applied to etymology sections, in order.
    pub static ref ETYMOLOGY_RULES: Vec<MarkupRule> = vec![
        MarkupRule::new("comment", r"(?s)<!--.*?-->", Replacement::Literal("")),
        MarkupRule::new(
            "source-template",
            r"\{\{(?:inh|inh\+|der|der\+|bor|bor\+|lbor|slbor|uder|ubor)\|[^|{}]*\|(?P<lang>[^|{}]*)\|(?P<term>[^|{}]*)(?:\|[^{}]*)?\}\}",
            Replacement::Expand(expand_language_term),
        ),
        MarkupRule::new(
            "cognate-template",
            r"\{\{(?:cog|ncog|noncog)\|(?P<lang>[^|{}]*)\|(?P<term>[^|{}]*)(?:\|[^{}]*)?\}\}",
            Replacement::Expand(expand_language_term),
        ),
        MarkupRule::new(
            "mention-template",
            r"\{\{(?:m|mention|l|link|ll)\|(?P<lang>[^|{}]*)\|(?P<term>[^|{}]*)(?:\|[^{}]*)?\}\}",
            Replacement::Expand(expand_language_term),
        ),
        MarkupRule::new(
            "wikipedia-link",
            r"\[\[w:(?P<target>[^\]|]*)(?:\|(?P<text>[^\]]*))?\]\]",
            Replacement::Expand(expand_link),
        ),
        MarkupRule::new(
            "wiki-link",
            r"\[\[(?P<target>[^\]|]*)(?:\|(?P<text>[^\]]*))?\]\]",
            Replacement::Expand(expand_link),
        ),
        MarkupRule::new("bold", r"'''(.+?)'''", Replacement::Expand(inner_text)),
        MarkupRule::new("italic", r"''(.+?)''", Replacement::Expand(inner_text)),
        MarkupRule::new("self-closing-reference", r"<ref[^>]*/>", Replacement::Literal("")),
        MarkupRule::new("reference", r"(?s)<ref[^>]*>.*?</ref>", Replacement::Literal("")),
        MarkupRule::new("template", r"\{\{[^{}]*\}\}", Replacement::Literal("")).repeated(),
        MarkupRule::new("horizontal-space", r"[ \t]+", Replacement::Literal(" ")),
        MarkupRule::new("line-edges", r"(?m)^[ \t]+|[ \t]+$", Replacement::Literal("")),
        MarkupRule::new("blank-lines", r"\n{3,}", Replacement::Literal("\n\n")),
    ];
}

fn inner_text(caps: &Captures<'_>) -> String {
    caps[1].to_string()
}

/// Names of the rules applied to example sentences.
const EXAMPLE_RULE_NAMES: &[&str] = &["bold", "wikipedia-link", "wiki-link"];

/// Look up an etymology rule by name.
pub fn rule(name: &str) -> Option<&'static MarkupRule> {
    ETYMOLOGY_RULES.iter().find(|rule| rule.name == name)
}

fn apply_rules<'r>(text: &str, rules: impl IntoIterator<Item = &'r MarkupRule>) -> String {
    let mut text = text.to_string();
    for rule in rules {
        let next = match rule.apply(&text) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(next) => next,
        };
        text = next;
    }
    text
}

/// Turn the raw markup of an etymology section into plain prose.
pub fn clean_etymology_markup(raw: &str) -> String {
    apply_rules(raw, ETYMOLOGY_RULES.iter()).trim().to_string()
}

/// Strip bold and link markup from an example sentence.
pub fn clean_example_markup(raw: &str) -> String {
    let rules = EXAMPLE_RULE_NAMES.iter().filter_map(|name| rule(name));
    apply_rules(raw.trim(), rules).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(name: &str, text: &str) -> String {
        rule(name)
            .unwrap_or_else(|| panic!("no rule named {name}"))
            .apply(text)
            .into_owned()
    }

    #[test]
    fn test_language_names() {
        assert_eq!(language_name("la"), Some("Latin"));
        assert_eq!(language_name("fro"), Some("Old French"));
        assert_eq!(language_name("ang"), Some("Old English"));
        assert_eq!(language_name("enm"), Some("Middle English"));
        assert_eq!(language_name("grc"), Some("Ancient Greek"));
        assert_eq!(language_name("xx-unknown"), None);
        assert_eq!(language_name("en"), None);
    }

    #[test]
    fn test_derivation_template() {
        assert_eq!(
            apply("source-template", "{{der|en|la|vertere}}"),
            "Latin vertere"
        );
        assert_eq!(
            apply("source-template", "{{der|en|fro|avertir}}"),
            "Old French avertir"
        );
        assert_eq!(
            apply("source-template", "{{der|en|grc|ἔτυμον|t=true sense}}"),
            "Ancient Greek ἔτυμον"
        );
        assert_eq!(apply("source-template", "{{der|en|grc|-}}"), "Ancient Greek");
    }

    #[test]
    fn test_inheritance_template() {
        assert_eq!(
            apply("source-template", "From {{inh|en|enm|werk}}, from {{inh|en|ang|weorc}}."),
            "From Middle English werk, from Old English weorc."
        );
    }

    #[test]
    fn test_borrowing_template() {
        assert_eq!(
            apply("source-template", "{{bor|en|la|vertigo}}"),
            "Latin vertigo"
        );
    }

    #[test]
    fn test_unknown_language_emits_bare_term() {
        assert_eq!(apply("source-template", "{{der|en|xqz|blorp}}"), "blorp");
        assert_eq!(apply("cognate-template", "{{cog|xqz|blorp}}"), "blorp");
        assert_eq!(apply("mention-template", "{{m|en|turn}}"), "turn");
    }

    #[test]
    fn test_cognate_template() {
        assert_eq!(
            apply("cognate-template", "cognate with {{cog|de|Werk}} and {{ncog|sa|वर्त}}"),
            "cognate with German Werk and Sanskrit वर्त"
        );
    }

    #[test]
    fn test_mention_template() {
        assert_eq!(
            apply("mention-template", "{{m|la|vertere||to turn}}"),
            "Latin vertere"
        );
        assert_eq!(apply("mention-template", "{{l|ang|weorc}}"), "Old English weorc");
    }

    #[test]
    fn test_wikipedia_link() {
        assert_eq!(
            apply("wikipedia-link", "[[w:Old English|Anglo-Saxon]] roots"),
            "Anglo-Saxon roots"
        );
        assert_eq!(apply("wikipedia-link", "[[w:Latin]]"), "Latin");
    }

    #[test]
    fn test_wiki_link() {
        assert_eq!(apply("wiki-link", "see [[turn]]"), "see turn");
        assert_eq!(apply("wiki-link", "see [[vertere#Latin|vertere]]"), "see vertere");
        assert_eq!(apply("wiki-link", "see [[vertere#Latin]]"), "see vertere");
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(apply("bold", "a '''bold''' word"), "a bold word");
        assert_eq!(apply("italic", "an ''italic'' word"), "an italic word");
        assert_eq!(
            clean_etymology_markup("'''bold''' and ''italic''"),
            "bold and italic"
        );
    }

    #[test]
    fn test_references_removed() {
        assert_eq!(
            apply("reference", "text<ref>Some citation, p. 4</ref> more"),
            "text more"
        );
        assert_eq!(
            apply("reference", "text<ref name=\"oed\">multi\nline</ref>."),
            "text."
        );
        assert_eq!(
            apply("self-closing-reference", "text<ref name=\"oed\" />."),
            "text."
        );
        // A self-closing tag must not open a paired match.
        assert_eq!(
            clean_etymology_markup("a<ref name=\"x\"/> b <ref>c</ref> d"),
            "a b d"
        );
    }

    #[test]
    fn test_remaining_templates_removed() {
        assert_eq!(apply("template", "{{root|en|ine-pro|*wert-}}From"), "From");
        assert_eq!(apply("template", "{{a|{{b|c}}}}x"), "x");
    }

    #[test]
    fn test_whitespace_rules() {
        assert_eq!(apply("blank-lines", "a\n\n\n\nb"), "a\n\nb");
        assert_eq!(apply("blank-lines", "a\n\nb"), "a\n\nb");
        assert_eq!(apply("horizontal-space", "a \t  b"), "a b");
        assert_eq!(apply("line-edges", " a \n b\t\nc"), "a\nb\nc");
    }

    #[test]
    fn test_comment_removed() {
        assert_eq!(apply("comment", "a<!-- hidden\nnote -->b"), "ab");
    }

    #[test]
    fn test_clean_etymology_markup() {
        let raw = "From {{inh|en|enm|vertigo}}, from {{der|en|la|vertīgō||a whirling}}, \
                   from {{m|la|vertere||to turn}}.<ref>OED</ref> {{rootsee|en|ine-pro|*wert-}}\n\n\n\n\
                   Compare [[w:French language|French]] ''vertige''.";
        assert_eq!(
            clean_etymology_markup(raw),
            "From Middle English vertigo, from Latin vertīgō, from Latin vertere.\n\n\
             Compare French vertige."
        );
    }

    #[test]
    fn test_clean_example_markup() {
        assert_eq!(
            clean_example_markup("  The '''vertigo''' made him [[stagger|stumble]].  "),
            "The vertigo made him stumble."
        );
    }

    #[test]
    fn test_rules_are_named_uniquely() {
        let mut names: Vec<&str> = ETYMOLOGY_RULES.iter().map(|r| r.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
