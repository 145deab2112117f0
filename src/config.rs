use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::i18n::Locale;

/// Top-level configuration for exif-report.
///
/// # Loading
///
/// ```rust,no_run
/// use exif_report::config::Config;
/// use exif_report::i18n::Locale;
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.locale = Locale::JaJp;
/// config.deadline_secs = Some(60);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language of report diagnostics and status messages.
    pub locale: Locale,
    /// User-Agent sent with attachment downloads.
    pub user_agent: String,
    /// Overall limit for one invocation, in seconds. Downloads themselves
    /// carry no timeout; `None` waits as long as it takes.
    pub deadline_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::EnUs,
            user_agent: format!("exif-report/{}", env!("CARGO_PKG_VERSION")),
            deadline_secs: None,
        }
    }
}

impl Config {
    /// Resolve the config file path: same directory as the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.json"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let config = Config {
            locale: Locale::ZhCn,
            user_agent: "test-agent".into(),
            deadline_secs: Some(90),
        };
        config.save(Some(&path)).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.deadline(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "locale": "ja-JP" }"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.locale, Locale::JaJp);
        assert_eq!(config.user_agent, Config::default().user_agent);
        assert_eq!(config.deadline(), None);
    }

    #[test]
    fn unknown_locale_in_file_falls_back_to_english() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "locale": "fr-FR", "deadline_secs": 5 }"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.deadline_secs, Some(5));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
