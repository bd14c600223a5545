//! Configuration management for farewatch using the prefer crate.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::SourceId;
use crate::repository::util::database_url;
use crate::scrapers::{flyagain, flyday, USER_AGENT};

/// Default database filename.
pub const DEFAULT_DATABASE_FILENAME: &str = "farewatch.db";

/// Default daily run time (UTC).
pub const DEFAULT_RUN_AT: &str = "23:00";

/// Listings older than this many months are pruned after each run.
pub const DEFAULT_RETENTION_MONTHS: u32 = 3;

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
    /// Database URL (overrides data_dir/database_filename if set).
    pub database_url: Option<String>,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub request_timeout: u64,
    /// Upper bound for one source's whole scrape, in seconds.
    pub source_timeout: u64,
    pub flyday_url: String,
    pub flyagain_url: String,
    /// Sources to scrape.
    pub sources: Vec<SourceId>,
    /// Daily run time, `HH:MM` UTC.
    pub run_at: String,
    pub retention_months: u32,
    /// Telegram bot token, possibly a `${VAR}` reference.
    pub telegram_bot_token: Option<String>,
    /// Concurrent Telegram requests.
    pub telegram_max_in_flight: usize,
}

impl Default for Settings {
    fn default() -> Self {
        // Documents dir -> Home dir -> Current dir
        let data_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("farewatch");

        Self {
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            database_url: None,
            user_agent: USER_AGENT.to_string(),
            request_timeout: 30,
            source_timeout: 120,
            flyday_url: flyday::DEFAULT_URL.to_string(),
            flyagain_url: flyagain::DEFAULT_URL.to_string(),
            sources: SourceId::all().to_vec(),
            run_at: DEFAULT_RUN_AT.to_string(),
            retention_months: DEFAULT_RETENTION_MONTHS,
            telegram_bot_token: None,
            telegram_max_in_flight: 8,
        }
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Default::default()
        }
    }

    /// Get the database URL, constructing from path if not explicitly set.
    pub fn database_url(&self) -> String {
        database_url(
            &self.data_dir,
            &self.database_filename,
            self.database_url.as_deref(),
        )
    }

    /// Get the full path to the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Check if the database appears to be initialized.
    pub fn database_exists(&self) -> bool {
        self.database_url.is_some() || self.database_path().exists()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout)
    }

    /// Listing page URL for `source`.
    pub fn source_url(&self, source: SourceId) -> &str {
        match source {
            SourceId::Flyday => &self.flyday_url,
            SourceId::FlyAgain => &self.flyagain_url,
        }
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create data directory '{}': {}",
                    self.data_dir.display(),
                    e
                ),
            )
        })
    }
}

/// Per-site settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, prefer::FromValue)]
pub struct SourcesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flyday_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flyagain_url: Option<String>,
    /// Source ids to scrape, e.g. `["flyday"]`. Unset means all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, prefer::FromValue)]
pub struct ScheduleConfig {
    /// Daily run time, `HH:MM` UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, prefer::FromValue)]
pub struct TelegramConfig {
    /// Bot token or a `${VAR}` reference to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_in_flight: Option<usize>,
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, prefer::FromValue)]
pub struct Config {
    /// Data directory path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Database filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Per-source scrape timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_months: Option<u32>,
    #[serde(default)]
    #[prefer(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    #[prefer(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    #[prefer(default)]
    pub telegram: TelegramConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    #[prefer(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers farewatch config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("farewatch").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => Self::load_from_path(path).await.unwrap_or_else(|e| {
                    tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                    Self::default()
                }),
                None => Self::default(),
            },
            // No config file found
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn parse(contents: &str, ext: &str) -> Result<Self, String> {
        match ext {
            "toml" => toml::from_str(contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e)),
            "yaml" | "yml" => serde_yaml::from_str(contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e)),
            _ => serde_json::from_str(contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e)),
        }
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = self.resolve_path(data_dir, base_dir);
        }
        if let Some(ref database) = self.database {
            settings.database_filename = database.clone();
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(timeout) = self.source_timeout {
            settings.source_timeout = timeout;
        }
        if let Some(months) = self.retention_months {
            settings.retention_months = months;
        }
        if let Some(ref url) = self.sources.flyday_url {
            settings.flyday_url = url.clone();
        }
        if let Some(ref url) = self.sources.flyagain_url {
            settings.flyagain_url = url.clone();
        }
        if let Some(ref enabled) = self.sources.enabled {
            settings.sources = enabled
                .iter()
                .filter_map(|id| {
                    let source = SourceId::from_str(id);
                    if source.is_none() {
                        tracing::warn!("Unknown source '{}' in config, skipping", id);
                    }
                    source
                })
                .collect();
        }
        if let Some(ref run_at) = self.schedule.run_at {
            settings.run_at = run_at.clone();
        }
        if let Some(ref token) = self.telegram.bot_token {
            settings.telegram_bot_token = Some(token.clone());
        }
        if let Some(n) = self.telegram.max_in_flight {
            settings.telegram_max_in_flight = n;
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    /// Explicit config file path (--config flag).
    pub config_path: Option<PathBuf>,
    /// Data directory override (--data flag).
    pub data_dir: Option<PathBuf>,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Load settings with explicit options.
/// Priority: defaults < config file < --data < environment.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path).await.unwrap_or_else(|e| {
            tracing::warn!("Ignoring config file {}: {}", path.display(), e);
            Config::default()
        }),
        None => Config::load().await,
    };

    let mut settings = Settings::default();
    let base_dir = config
        .base_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    config.apply_to_settings(&mut settings, &base_dir);

    if let Some(data_dir) = options.data_dir {
        settings.data_dir = data_dir;
    }

    apply_env_overrides(&mut settings);

    (settings, config)
}

fn apply_env_overrides(settings: &mut Settings) {
    // DATABASE_URL takes highest precedence
    if let Some(url) = env_var("DATABASE_URL") {
        tracing::debug!("Using DATABASE_URL from environment: {}", url);
        settings.database_url = Some(url);
    }
    if let Some(token) = env_var("TELEGRAM_BOT_TOKEN") {
        settings.telegram_bot_token = Some(token);
    }
}
