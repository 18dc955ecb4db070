//! Extraction of the short etymology summary served by the primary source.
//!
//! The primary source publishes its summary in the page's meta description,
//! usually followed by a " See origin and meaning of ..." pointer which is
//! cut off here.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::source::PrimaryDocument;

lazy_static! {
    static ref META_DESCRIPTION: Regex =
        Regex::new(r#"<meta\s+name="description"\s+content="([^"]*)""#).unwrap();
    static ref OG_DESCRIPTION: Regex =
        Regex::new(r#"<meta\s+property="og:description"\s+content="([^"]*)""#).unwrap();
    static ref ENTITY: Regex = Regex::new(r"&(?:quot|amp|#39|#x27|hellip);").unwrap();
}

const ORIGIN_POINTER: &str = " See origin";

/// Extract the etymology summary for `requested` from a primary document.
///
/// Returns `None` when the source redirected to a different headword, when
/// the document carries no description, or when the description is empty.
pub fn extract_primary_etymology(requested: &str, document: &PrimaryDocument) -> Option<String> {
    if !same_headword(requested, &document.resolved_headword) {
        return None;
    }

    let content = description(&document.raw_text)?;
    let content = match content.find(ORIGIN_POINTER) {
        Some(idx) if idx > 0 => &content[..idx],
        _ => content,
    };

    let text = decode_entities(content.trim());
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn same_headword(requested: &str, resolved: &str) -> bool {
    requested.trim().to_lowercase() == resolved.trim().to_lowercase()
}

fn description(html: &str) -> Option<&str> {
    META_DESCRIPTION
        .captures(html)
        .or_else(|| OG_DESCRIPTION.captures(html))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY.replace_all(text, |caps: &Captures<'_>| match &caps[0] {
        "&quot;" => "\"",
        "&amp;" => "&",
        "&#39;" | "&#x27;" => "'",
        _ => "...",
    })
}
