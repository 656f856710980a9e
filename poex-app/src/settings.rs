//! User settings persistence via TOML.
//!
//! Settings are stored at `<config_dir>/poex/settings.toml`.
//! Missing or corrupted config files return sensible defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use poex_protocol::AccountId;
use serde::{Deserialize, Serialize};

/// Well-known development account (alice).
pub const DEV_ACCOUNT_ADDRESS: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

/// User-configurable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Display name for the active account.
    pub account_name: String,
    /// Address the active account signs with. Empty means no account
    /// is active and the proof screen renders nothing.
    pub account_address: String,
    /// UI theme.
    pub theme: Theme,
}

/// UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            account_name: "alice".to_string(),
            account_address: DEV_ACCOUNT_ADDRESS.to_string(),
            theme: Theme::Dark,
        }
    }
}

impl Settings {
    /// The active account, if an address is configured.
    pub fn account(&self) -> Option<AccountId> {
        if self.account_address.trim().is_empty() {
            None
        } else {
            Some(AccountId(self.account_address.clone()))
        }
    }

    /// Load settings from the default config path.
    ///
    /// Returns defaults if the file doesn't exist or is corrupted.
    pub fn load() -> Self {
        Self::load_from_dir(Self::config_dir())
    }

    /// Save settings to the default config path.
    pub fn save(&self) -> Result<()> {
        self.save_to_dir(Self::config_dir())
    }

    /// Load settings from a specific config directory.
    pub fn load_from_dir(config_dir: PathBuf) -> Self {
        let path = config_dir.join("settings.toml");
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(settings) => {
                    tracing::info!(path = %path.display(), "settings loaded");
                    settings
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "corrupted settings file, using defaults"
                    );
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    path = %path.display(),
                    "settings file not found, using defaults"
                );
                Self::default()
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to read settings file, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Save settings to a specific config directory.
    pub fn save_to_dir(&self, config_dir: PathBuf) -> Result<()> {
        std::fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "failed to create config directory: {}",
                config_dir.display()
            )
        })?;

        let path = config_dir.join("settings.toml");
        let contents = toml::to_string_pretty(self).context("failed to serialize settings")?;
        std::fs::write(&path, &contents)
            .with_context(|| format!("failed to write settings file: {}", path.display()))?;

        tracing::info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Get the default config directory.
    fn config_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "poex")
            .map(|d| d.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("poex-config"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_settings_carry_the_dev_account() {
        let settings = Settings::default();
        assert_eq!(settings.account_name, "alice");
        assert_eq!(settings.account(), Some(AccountId::from(DEV_ACCOUNT_ADDRESS)));
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn empty_address_means_no_account() {
        let settings = Settings {
            account_address: "  ".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.account(), None);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let config_dir = tmp.path().to_path_buf();

        let settings = Settings {
            account_name: "bob".to_string(),
            account_address: "5FHneW46...".to_string(),
            theme: Theme::Light,
        };

        settings.save_to_dir(config_dir.clone()).unwrap();
        let loaded = Settings::load_from_dir(config_dir);

        assert_eq!(settings, loaded);
    }

    #[test]
    fn missing_config_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let loaded = Settings::load_from_dir(tmp.path().join("nonexistent"));
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn corrupted_config_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config_dir = tmp.path().to_path_buf();
        std::fs::write(config_dir.join("settings.toml"), "{{{{not valid toml}}}}").unwrap();

        let loaded = Settings::load_from_dir(config_dir);
        assert_eq!(loaded, Settings::default());
    }
}
