//! Wiktionary client (secondary etymology source).

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{CairnError, Result};
use crate::source::SecondaryEtymologySource;
use crate::source::http::build_client;

/// Default MediaWiki API endpoint.
pub const DEFAULT_WIKTIONARY_API: &str = "https://en.wiktionary.org/w/api.php";

/// Fetches page wikitext through the MediaWiki revisions API.
#[derive(Debug, Clone)]
pub struct WiktionarySource {
    client: Client,
    api_url: String,
}

impl WiktionarySource {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(WiktionarySource {
            client: build_client(timeout)?,
            api_url: api_url.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<Query>,
}

#[derive(Debug, Deserialize)]
struct Query {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    revisions: Vec<Revision>,
}

#[derive(Debug, Deserialize)]
struct Revision {
    slots: Slots,
}

#[derive(Debug, Deserialize)]
struct Slots {
    main: MainSlot,
}

#[derive(Debug, Deserialize)]
struct MainSlot {
    #[serde(rename = "*", default)]
    content: String,
}

/// Extract the wikitext of the first page of a revisions query.
fn page_wikitext(body: &str) -> Result<Option<String>> {
    let response: QueryResponse = serde_json::from_str(body)?;
    let content = response
        .query
        .and_then(|query| query.pages.into_values().next())
        .and_then(|page| page.revisions.into_iter().next())
        .map(|revision| revision.slots.main.content.trim().to_string())
        .filter(|content| !content.is_empty());
    Ok(content)
}

#[async_trait]
impl SecondaryEtymologySource for WiktionarySource {
    async fn fetch_markup(&self, word: &str) -> Result<Option<String>> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Err(CairnError::invalid_argument("no word"));
        }

        debug!("fetching secondary etymology for {word:?} from {}", self.api_url);
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("prop", "revisions"),
                ("rvprop", "content"),
                ("rvslots", "main"),
                ("format", "json"),
                ("titles", word.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CairnError::status("wiktionary", response.status()));
        }

        let body = response.text().await?;
        page_wikitext(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wikitext() {
        let body = r#"{"batchcomplete":"","query":{"pages":{"123":{"pageid":123,"title":"vertigo",
            "revisions":[{"slots":{"main":{"contentmodel":"wikitext","*":"==English==\n===Etymology===\nFrom {{der|en|la|vertigo}}."}}}]}}}}"#;
        let text = page_wikitext(body).unwrap().unwrap();
        assert!(text.starts_with("==English=="));
        assert!(text.contains("{{der|en|la|vertigo}}"));
    }

    #[test]
    fn test_missing_page_has_no_wikitext() {
        let body = r#"{"batchcomplete":"","query":{"pages":{"-1":{"ns":0,"title":"zzxq","missing":""}}}}"#;
        assert_eq!(page_wikitext(body).unwrap(), None);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(page_wikitext("<html>").is_err());
    }
}
