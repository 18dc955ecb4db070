//! Highlighting of looked-up words in rendered text.
//!
//! Tokens are matched against the current headword and the most recently
//! looked-up words, allowing for common inflections ("running" matches
//! "run", "berries" matches "berry").

use std::borrow::Cow;
use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref WORD_TOKEN: Regex = Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)?").unwrap();
}

const BOLD_GREEN: &str = "\x1b[1;32m";
const BOLD_CYAN: &str = "\x1b[1;36m";
const RESET: &str = "\x1b[0m";

/// The word itself followed by the forms it may be inflected from.
pub fn base_forms(word: &str) -> Vec<String> {
    let word = word.to_lowercase();
    if word.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = word.chars().collect();
    let len = chars.len();
    let stem = |cut: usize| -> String { chars[..len - cut].iter().collect() };
    let doubled = |end: usize| end >= 2 && chars[end - 1] == chars[end - 2];

    let mut forms = vec![word.clone()];
    if len > 3 && (word.ends_with("ies") || word.ends_with("ied")) {
        forms.push(stem(3) + "y");
    }
    if len > 4 && word.ends_with("ing") {
        forms.push(stem(3));
        if doubled(len - 3) {
            forms.push(stem(4));
        }
    }
    if len > 3 && word.ends_with("ed") {
        forms.push(stem(2));
        if doubled(len - 2) {
            forms.push(stem(3));
        }
    }
    if len > 2 && word.ends_with("es") {
        forms.push(stem(2));
    }
    if len > 1 && word.ends_with('s') && !word.ends_with("ss") {
        forms.push(stem(1));
    }
    if len > 3 && word.ends_with("er") {
        forms.push(stem(2));
        if len > 4 && doubled(len - 2) {
            forms.push(stem(3));
        }
    }
    if len > 4 && word.ends_with("est") {
        forms.push(stem(3));
        if len > 5 && doubled(len - 3) {
            forms.push(stem(4));
        }
    }
    if len > 3 && word.ends_with("ly") {
        forms.push(stem(2));
    }
    forms
}

/// How a token is emphasised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// The word being looked up.
    Current,
    /// A recently looked-up word.
    Previous,
}

/// Emphasises current and previously looked-up words.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    current: HashSet<String>,
    previous: HashSet<String>,
    color: bool,
}

impl Highlighter {
    /// Create a highlighter; `color` selects ANSI colors over `**` markers.
    pub fn new<C, P>(current: C, previous: P, color: bool) -> Self
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        Highlighter {
            current: current.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
            previous: previous.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
            color,
        }
    }

    /// A highlighter that leaves text untouched.
    pub fn disabled() -> Self {
        Highlighter::default()
    }

    pub fn uses_color(&self) -> bool {
        self.color
    }

    /// The emphasis of a single token, if any.
    pub fn emphasis(&self, token: &str) -> Option<Emphasis> {
        let forms = base_forms(token);
        if forms.iter().any(|form| self.current.contains(form)) {
            Some(Emphasis::Current)
        } else if forms.iter().any(|form| self.previous.contains(form)) {
            Some(Emphasis::Previous)
        } else {
            None
        }
    }

    /// Highlight every matching word token of `text`.
    pub fn highlight<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.current.is_empty() && self.previous.is_empty() {
            return Cow::Borrowed(text);
        }
        WORD_TOKEN.replace_all(text, |caps: &Captures<'_>| {
            let token = &caps[0];
            match (self.emphasis(token), self.color) {
                (None, _) => token.to_string(),
                (Some(Emphasis::Current), true) => format!("{BOLD_GREEN}{token}{RESET}"),
                (Some(Emphasis::Previous), true) => format!("{BOLD_CYAN}{token}{RESET}"),
                (Some(_), false) => format!("**{token}**"),
            }
        })
    }
}
