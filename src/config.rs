//! Configuration file support.
//!
//! Settings are read from `~/.cairn.toml` (or the file given with
//! `--config`). Every section and key is optional.
//!
//! ```toml
//! [dictionary]
//! max_edit_distance = 2
//!
//! [etymology]
//! language = "French"
//! language_code = "fr"
//!
//! [history]
//! recent = 5
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{CairnError, Result};
use crate::etymology::TargetLanguage;
use crate::source::dictionary_api::DEFAULT_DICTIONARY_API;
use crate::source::etymonline::DEFAULT_ETYMONLINE_BASE;
use crate::source::wiktionary::DEFAULT_WIKTIONARY_API;
use crate::source::word_list::DEFAULT_WORD_LIST_URL;
use crate::spelling::DEFAULT_MAX_DISTANCE;

const CONFIG_FILE_NAME: &str = ".cairn.toml";
const HISTORY_FILE_NAME: &str = ".cairn_dict.json";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CairnConfig {
    pub dictionary: DictionaryConfig,
    pub etymology: EtymologyConfig,
    pub vocabulary: VocabularyConfig,
    pub history: HistoryConfig,
}

/// Dictionary lookups and spelling suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Base URL of the definitions API.
    pub api_base: String,
    /// Largest edit distance of a spelling suggestion.
    pub max_edit_distance: usize,
    /// Suggest a spelling when a word is not found.
    pub suggest: bool,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Etymology sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtymologyConfig {
    /// Base URL of primary source word pages.
    pub primary_base: String,
    /// MediaWiki API endpoint of the secondary source.
    pub secondary_api: String,
    /// Heading of the secondary source's language section.
    pub language: String,
    /// Language code used in the secondary source's templates.
    pub language_code: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// The spelling reference word list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// URL of a one-word-per-line list.
    pub url: String,
    /// Local word list, used instead of `url` when set.
    pub path: Option<PathBuf>,
    /// Download timeout in seconds.
    pub timeout_secs: u64,
}

/// Lookup history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// History file; defaults to `~/.cairn_dict.json`.
    pub path: Option<PathBuf>,
    /// How many recent words are highlighted.
    pub recent: usize,
    /// Record lookups at all.
    pub enabled: bool,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_DICTIONARY_API.to_string(),
            max_edit_distance: DEFAULT_MAX_DISTANCE,
            suggest: true,
            timeout_secs: 15,
        }
    }
}

impl Default for EtymologyConfig {
    fn default() -> Self {
        let language = TargetLanguage::default();
        Self {
            primary_base: DEFAULT_ETYMONLINE_BASE.to_string(),
            secondary_api: DEFAULT_WIKTIONARY_API.to_string(),
            language: language.name,
            language_code: language.code,
            timeout_secs: 15,
        }
    }
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_WORD_LIST_URL.to_string(),
            path: None,
            timeout_secs: 30,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            recent: 3,
            enabled: true,
        }
    }
}

impl CairnConfig {
    /// Load the configuration.
    ///
    /// With an explicit `path` the file must exist. Otherwise
    /// `~/.cairn.toml` is read when present and defaults are used when not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let path = expand_home(path);
                if !path.exists() {
                    return Err(CairnError::config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::load_file(&path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                Some(path) => {
                    debug!("No config file at {}, using defaults", path.display());
                    Ok(Self::default())
                }
                None => Ok(Self::default()),
            },
        }
    }

    /// Read and parse one TOML file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let language = self.target_language();
        if language.name.is_empty() || language.code.is_empty() {
            return Err(CairnError::config(
                "etymology language and language_code must be set",
            ));
        }
        let timeouts = [
            self.dictionary.timeout_secs,
            self.etymology.timeout_secs,
            self.vocabulary.timeout_secs,
        ];
        if timeouts.contains(&0) {
            return Err(CairnError::config("timeouts must be at least one second"));
        }
        Ok(())
    }

    /// `~/.cairn.toml`, when a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// The history file, with `~` expanded.
    pub fn history_path(&self) -> PathBuf {
        match &self.history.path {
            Some(path) => expand_home(path),
            None => dirs::home_dir()
                .map(|home| home.join(HISTORY_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(HISTORY_FILE_NAME)),
        }
    }

    /// The local word list, with `~` expanded.
    pub fn vocabulary_path(&self) -> Option<PathBuf> {
        self.vocabulary.path.as_deref().map(expand_home)
    }

    pub fn target_language(&self) -> TargetLanguage {
        TargetLanguage::new(
            self.etymology.language.trim(),
            self.etymology.language_code.trim(),
        )
    }

    pub fn dictionary_timeout(&self) -> Duration {
        Duration::from_secs(self.dictionary.timeout_secs)
    }

    pub fn etymology_timeout(&self) -> Duration {
        Duration::from_secs(self.etymology.timeout_secs)
    }

    pub fn vocabulary_timeout(&self) -> Duration {
        Duration::from_secs(self.vocabulary.timeout_secs)
    }
}

/// Replace a leading `~` with the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
