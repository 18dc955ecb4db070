//! Shared HTTP client construction.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::{CairnError, Result};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("cairn/", env!("CARGO_PKG_VERSION"), " (CLI dictionary tool)");

/// Build a client with the cairn user agent and the given timeout.
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Parse `base` and append `segment` as one percent-encoded path segment.
pub fn url_with_segment(base: &str, segment: &str) -> Result<Url> {
    let mut url =
        Url::parse(base).map_err(|e| CairnError::config(format!("invalid URL {base:?}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| CairnError::config(format!("URL cannot have a path: {base:?}")))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

/// Last non-empty path segment of `url`, percent-decoded and lowercased.
pub fn last_path_segment(url: &Url) -> Option<String> {
    let segment = url
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()?;
    let decoded = urlencoding::decode_binary(segment.as_bytes());
    Some(String::from_utf8_lossy(&decoded).to_lowercase())
}
