//! Word list sources for the spelling vocabulary.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::error::{CairnError, Result};
use crate::source::VocabularySource;
use crate::source::http::build_client;

/// Default word list: one lowercase English word per line.
pub const DEFAULT_WORD_LIST_URL: &str =
    "https://raw.githubusercontent.com/dwyl/english-words/master/words_alpha.txt";

/// Word list downloaded over HTTP.
#[derive(Debug, Clone)]
pub struct HttpWordList {
    client: Client,
    url: String,
}

impl HttpWordList {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(HttpWordList {
            client: build_client(timeout)?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl VocabularySource for HttpWordList {
    async fn fetch_words(&self) -> Result<Vec<String>> {
        debug!("downloading word list from {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(CairnError::status("word list", response.status()));
        }
        let body = response.text().await?;
        Ok(split_words(&body))
    }
}

/// Word list read from a local file.
#[derive(Debug, Clone)]
pub struct FileWordList {
    path: PathBuf,
}

impl FileWordList {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileWordList { path: path.into() }
    }
}

#[async_trait]
impl VocabularySource for FileWordList {
    async fn fetch_words(&self) -> Result<Vec<String>> {
        debug!("reading word list from {}", self.path.display());
        let body = tokio::fs::read_to_string(&self.path).await?;
        Ok(split_words(&body))
    }
}

fn split_words(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}
