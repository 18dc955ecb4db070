//! Etymonline client (primary etymology source).

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};

use crate::error::{CairnError, Result};
use crate::source::http::{build_client, last_path_segment, url_with_segment};
use crate::source::{PrimaryDocument, PrimaryEtymologySource};

/// Default base URL for word pages.
pub const DEFAULT_ETYMONLINE_BASE: &str = "https://www.etymonline.com/word/";

/// Only the page head is needed; the meta description lives there.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Fetches word pages from etymonline.com.
#[derive(Debug, Clone)]
pub struct EtymonlineSource {
    client: Client,
    base_url: String,
}

impl EtymonlineSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(EtymonlineSource {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl PrimaryEtymologySource for EtymonlineSource {
    async fn fetch_document(&self, word: &str) -> Result<PrimaryDocument> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Err(CairnError::invalid_argument("no word"));
        }

        let url = url_with_segment(&self.base_url, &word)?;
        debug!("fetching primary etymology from {url}");
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(CairnError::status("etymonline", response.status()));
        }

        // Redirects are followed; the final URL names the entry actually served.
        let resolved_headword = last_path_segment(response.url()).unwrap_or_default();

        let body = read_capped(response, MAX_BODY_BYTES).await?;
        Ok(PrimaryDocument::new(
            resolved_headword,
            String::from_utf8_lossy(&body),
        ))
    }

    fn entry_url(&self, word: &str) -> Option<String> {
        url_with_segment(&self.base_url, &word.trim().to_lowercase())
            .ok()
            .map(String::from)
    }
}

/// Read at most `limit` bytes of the body; the rest is never downloaded.
async fn read_capped(mut response: Response, limit: usize) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    while body.len() < limit {
        let Some(chunk) = response.chunk().await? else {
            break;
        };
        let take = chunk.len().min(limit - body.len());
        body.extend_from_slice(&chunk[..take]);
    }
    Ok(body)
}
