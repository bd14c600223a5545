//! Shared helper functions for CLI commands.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};

use farewatch::config::Settings;
use farewatch::dictionary::{Entity, EntityDictionary};
use farewatch::models::SourceId;
use farewatch::notify::{LogNotifier, Notifier, NotifyEngine, TelegramNotifier};
use farewatch::pipeline::{Pipeline, ScrapeOrchestrator};
use farewatch::repository::{run_migrations, DieselStore, SqlitePool};
use farewatch::scrapers::{
    FlyAgainExtractor, FlydayExtractor, HttpClient, PageFetcher, SourceExtractor,
};
use farewatch::tagger::Tagger;

/// Truncate a string to `max` characters, adding "..." if cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

/// Open the database, creating and migrating it if needed.
pub async fn open_store(settings: &Settings) -> anyhow::Result<Arc<DieselStore>> {
    settings.ensure_directories()?;
    let url = settings.database_url();
    run_migrations(&url)
        .await
        .with_context(|| format!("Failed to migrate database at {url}"))?;
    Ok(Arc::new(DieselStore::new(SqlitePool::new(&url))))
}

/// Map user input onto canonical dictionary values.
///
/// Accepts either the canonical value (`日本`) or the English name (`Japan`).
pub fn resolve_selection(
    entities: &[&Entity],
    inputs: &[String],
    what: &str,
) -> anyhow::Result<BTreeSet<String>> {
    inputs
        .iter()
        .map(|input| {
            let input = input.trim();
            entities
                .iter()
                .find(|e| e.value == input || e.english.eq_ignore_ascii_case(input))
                .map(|e| e.value.clone())
                .ok_or_else(|| {
                    anyhow!("Unknown {what} '{input}'. Run 'farewatch tags' to see valid values")
                })
        })
        .collect()
}

/// Wire the configured sources, store and notification channel into a pipeline.
pub fn build_pipeline(
    settings: &Settings,
    store: Arc<DieselStore>,
    dry_run: bool,
) -> anyhow::Result<Pipeline> {
    let dictionary = EntityDictionary::builtin()?;
    let tagger = Tagger::new(dictionary.clone());

    if settings.sources.is_empty() {
        bail!("No sources enabled in configuration");
    }

    let mut extractors: Vec<Arc<dyn SourceExtractor>> = Vec::new();
    for &source in &settings.sources {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpClient::new(
            source.as_str(),
            settings.request_timeout(),
            Some(settings.user_agent.as_str()),
        )?);
        let url = settings.source_url(source).to_string();
        let extractor: Arc<dyn SourceExtractor> = match source {
            SourceId::Flyday => Arc::new(FlydayExtractor::new(fetcher, tagger.clone(), url)),
            SourceId::FlyAgain => Arc::new(FlyAgainExtractor::new(fetcher, tagger.clone(), url)),
        };
        extractors.push(extractor);
    }

    let notifier: Arc<dyn Notifier> = if dry_run {
        Arc::new(LogNotifier)
    } else {
        let token = settings.telegram_bot_token.as_deref().ok_or_else(|| {
            anyhow!("No Telegram bot token configured. Set TELEGRAM_BOT_TOKEN or use --dry-run")
        })?;
        Arc::new(TelegramNotifier::from_config(
            token,
            settings.telegram_max_in_flight,
            settings.request_timeout(),
        )?)
    };

    let orchestrator =
        ScrapeOrchestrator::new(store.clone(), extractors, settings.source_timeout());
    let engine = NotifyEngine::new(store.clone(), notifier, dictionary);

    Ok(Pipeline::new(
        store,
        orchestrator,
        engine,
        settings.retention_months,
    ))
}
