//! Command implementations for the cairn CLI.

use std::sync::Arc;

use log::{debug, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::CairnConfig;
use crate::dictionary::{History, Lookup};
use crate::error::{CairnError, Result};
use crate::etymology::EtymologyReconciler;
use crate::source::{
    DictionaryApiSource, EtymonlineSource, FileWordList, HttpWordList, VocabularySource,
    WiktionarySource,
};
use crate::spelling::{SpellingSuggester, Vocabulary};

/// Execute a CLI command.
pub async fn execute_command(args: CairnArgs) -> Result<()> {
    let config = CairnConfig::load(args.config.as_deref())?;
    debug!("configuration: {config:?}");

    match &args.command {
        Command::Dict(dict_args) => look_up(dict_args, &config, &args).await,
        Command::Suggest(suggest_args) => suggest(suggest_args, &config, &args).await,
        Command::Etymology(etymology_args) => etymology(etymology_args, &config, &args).await,
        Command::History(history_args) => history(history_args, &config, &args),
    }
}

/// Build the spelling vocabulary from the configured word list.
pub fn build_vocabulary(config: &CairnConfig) -> Result<Arc<Vocabulary>> {
    let source: Arc<dyn VocabularySource> = match config.vocabulary_path() {
        Some(path) => Arc::new(FileWordList::new(path)),
        None => Arc::new(HttpWordList::new(
            config.vocabulary.url.as_str(),
            config.vocabulary_timeout(),
        )?),
    };
    Ok(Arc::new(Vocabulary::new(source)))
}

/// Build the etymology reconciler from the configured sources.
pub fn build_reconciler(config: &CairnConfig) -> Result<EtymologyReconciler> {
    let timeout = config.etymology_timeout();
    let primary = EtymonlineSource::new(config.etymology.primary_base.as_str(), timeout)?;
    let secondary = WiktionarySource::new(config.etymology.secondary_api.as_str(), timeout)?;
    Ok(EtymologyReconciler::new(Arc::new(primary), Arc::new(secondary))
        .with_language(config.target_language()))
}

/// The configured history store.
pub fn build_history(config: &CairnConfig) -> History {
    if config.history.enabled {
        History::new(config.history_path())
    } else {
        History::disabled()
    }
}

/// Build the lookup workflow.
pub fn build_lookup(config: &CairnConfig) -> Result<Lookup> {
    let dictionary = DictionaryApiSource::new(
        config.dictionary.api_base.as_str(),
        config.dictionary_timeout(),
    )?;
    let suggester = SpellingSuggester::new(build_vocabulary(config)?);
    Ok(
        Lookup::new(Arc::new(dictionary), suggester, build_reconciler(config)?)
            .with_history(build_history(config))
            .with_suggestions(config.dictionary.suggest)
            .with_max_distance(config.dictionary.max_edit_distance),
    )
}

/// Look a word up.
async fn look_up(args: &DictArgs, config: &CairnConfig, cli_args: &CairnArgs) -> Result<()> {
    let lookup = build_lookup(config)?
        .with_suggestions(config.dictionary.suggest && args.suggestions_enabled());

    // Read before the lookup records the current word.
    let previous = lookup.history().recent(config.history.recent);
    let report = lookup.run(&args.word).await?;

    for entry in &report.entries {
        if let Some(diagnostic) = &entry.etymology.diagnostic {
            warn!("{}: {diagnostic}", entry.entry.word);
        }
    }

    output_lookup(&report, &previous, cli_args)
}

/// Suggest a spelling.
async fn suggest(args: &SuggestArgs, config: &CairnConfig, cli_args: &CairnArgs) -> Result<()> {
    let query = args.word.trim().to_lowercase();
    if query.is_empty() {
        return Err(CairnError::invalid_argument("no word provided"));
    }
    let max_distance = args.max_distance.unwrap_or(config.dictionary.max_edit_distance);

    let suggester = SpellingSuggester::new(build_vocabulary(config)?);
    let candidate = suggester.suggest_candidate(&query, max_distance).await;

    output_suggestion(
        &SuggestionResult {
            query,
            distance: candidate.as_ref().map(|c| c.distance),
            suggestion: candidate.map(|c| c.word),
        },
        cli_args,
    )
}

/// Show the etymology of a word.
async fn etymology(args: &EtymologyArgs, config: &CairnConfig, cli_args: &CairnArgs) -> Result<()> {
    let word = args.word.trim().to_lowercase();
    if word.is_empty() {
        return Err(CairnError::invalid_argument("no word provided"));
    }

    let reconciler = build_reconciler(config)?;
    let etymology = reconciler.resolve(&word).await;
    if let Some(diagnostic) = &etymology.diagnostic {
        warn!("{word}: {diagnostic}");
    }

    output_etymology(&EtymologyResult { word, etymology }, cli_args)
}

/// List recently looked-up words.
fn history(args: &HistoryArgs, config: &CairnConfig, cli_args: &CairnArgs) -> Result<()> {
    let words = build_history(config).recent(args.limit);
    output_history(&HistoryResult { words }, cli_args)
}
