use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_ENV_VAR, DEFAULT_BASE_URL, DEFAULT_FETCH_DELAY_MS, DEFAULT_LOG_FILE,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SUBMIT_DELAY_MS, DEFAULT_TYPING_DELAY_MS,
};

/// Which response producer backs the chat
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProducerKind {
    #[default]
    Mock,
    /// Mock whose fetch always fails, for exercising the fallback path
    MockFail,
    Http,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub producer: ProducerKind,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub submit_delay_ms: u64,
    pub fetch_delay_ms: u64,
    pub typing_delay_ms: u64,
    pub chars_per_step: usize,
    pub show_welcome: bool,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            producer: ProducerKind::Mock,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            fetch_delay_ms: DEFAULT_FETCH_DELAY_MS,
            typing_delay_ms: DEFAULT_TYPING_DELAY_MS,
            chars_per_step: 1,
            show_welcome: true,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Load from `$CONSULT_CONFIG` or `~/.consult/config.yaml`.
    /// A missing file means defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Config = serde_yaml::from_str(content)?;
        config.chars_per_step = config.chars_per_step.max(1);
        Ok(config)
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|home| home.join(".consult").join("config.yaml"))
    }
}
