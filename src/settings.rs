use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_DATA_DIR: &str = "vitalcare-data";

pub const ENV_API_BASE_URL: &str = "VITALCARE_API_BASE_URL";
pub const ENV_POLL_INTERVAL_SECS: &str = "VITALCARE_POLL_INTERVAL_SECS";
pub const ENV_DATA_DIR: &str = "VITALCARE_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitorSettings {
    pub api_base_url: String,
    pub poll_interval_secs: u64,
    pub fetch_timeout_secs: u64,
    pub alert_retention: usize,
    pub chat_reply_delay_ms: u64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".into(),
            poll_interval_secs: 3,
            fetch_timeout_secs: 10,
            alert_retention: 50,
            chat_reply_delay_ms: 1000,
        }
    }
}

/// `VITALCARE_DATA_DIR`, or `./vitalcare-data`.
pub fn data_dir() -> PathBuf {
    env::var_os(ENV_DATA_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

impl MonitorSettings {
    /// Reads `<data_dir>/settings.json` and applies environment overrides.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut settings = Self::from_file(&data_dir.join(SETTINGS_FILE))?;
        settings.apply_env_overrides()?;
        settings.validate()?;
        Ok(settings)
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        Ok(serde_json::from_str(&contents).unwrap_or_else(|err| {
            log_warn!("Ignoring malformed settings at {}: {err}", path.display());
            Self::default()
        }))
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = env::var(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Ok(secs) = env::var(ENV_POLL_INTERVAL_SECS) {
            self.poll_interval_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("{ENV_POLL_INTERVAL_SECS} must be a whole number of seconds"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            bail!("apiBaseUrl must not be empty");
        }
        if self.poll_interval_secs < 1 {
            bail!("pollIntervalSecs must be at least 1");
        }
        if self.fetch_timeout_secs < 1 {
            bail!("fetchTimeoutSecs must be at least 1");
        }
        if self.alert_retention < 1 {
            bail!("alertRetention must be at least 1");
        }
        Ok(())
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let path = data_dir.join(SETTINGS_FILE);
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(&path, serialized)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn chat_reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat_reply_delay_ms)
    }
}
