//! Free Dictionary API client (definitions source).

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::dictionary::entry::{ApiErrorBody, DictionaryEntry, DictionaryResponse};
use crate::error::{CairnError, Result};
use crate::source::DictionarySource;
use crate::source::http::{build_client, url_with_segment};

/// Default endpoint for English entries.
pub const DEFAULT_DICTIONARY_API: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Looks words up on dictionaryapi.dev.
#[derive(Debug, Clone)]
pub struct DictionaryApiSource {
    client: Client,
    base_url: String,
}

impl DictionaryApiSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(DictionaryApiSource {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

// The API documents an object but has served a one-element array as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    One(ApiErrorBody),
    Many(Vec<ApiErrorBody>),
}

fn not_found_message(body: &str) -> Option<String> {
    let payload: ErrorPayload = serde_json::from_str(body).ok()?;
    let message = match payload {
        ErrorPayload::One(error) => error.message,
        ErrorPayload::Many(errors) => errors.into_iter().next()?.message,
    };
    let message = message.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

#[async_trait]
impl DictionarySource for DictionaryApiSource {
    async fn lookup(&self, word: &str) -> Result<DictionaryResponse> {
        let url = url_with_segment(&self.base_url, word)?;
        debug!("looking up {word:?} at {url}");
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                let body = response.text().await.unwrap_or_default();
                Ok(DictionaryResponse::NotFound {
                    message: not_found_message(&body),
                })
            }
            status if status.is_success() => {
                let entries: Vec<DictionaryEntry> = response.json().await?;
                Ok(DictionaryResponse::Found(entries))
            }
            status => Err(CairnError::status("dictionary API", status)),
        }
    }
}
