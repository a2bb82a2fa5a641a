// SPDX-License-Identifier: MIT OR Apache-2.0
use anyhow::Result;
use megamenu_core::config::{Timings, HOVER_INTENT_DELAY_MS, LAYOUT_SETTLE_DELAY_MS};
use serde::Deserialize;
use smol::fs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use xdg::BaseDirectories;

/// Environment variable overriding the hover-intent delay, in milliseconds.
pub const HOVER_DELAY_ENV: &str = "MEGAMENU_HOVER_DELAY";

/// Host-level settings for every menu on a page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuSettings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,
    /// Interaction timings
    #[serde(default)]
    pub timing: TimingSettings,
    /// Any other sections are captured here
    #[serde(flatten)]
    pub other: HashMap<String, toml::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralSettings {
    pub debug: Option<bool>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimingSettings {
    pub hover_intent_delay_ms: Option<u64>,
    pub layout_settle_delay_ms: Option<u64>,
}

impl MenuSettings {
    fn defaults() -> Self {
        Self {
            general: GeneralSettings {
                debug: Some(false),
                log_level: None,
            },
            timing: TimingSettings {
                hover_intent_delay_ms: Some(HOVER_INTENT_DELAY_MS),
                layout_settle_delay_ms: Some(LAYOUT_SETTLE_DELAY_MS),
            },
            other: HashMap::new(),
        }
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Filter string for the logger: `log_level` if set, `debug` when only
    /// the debug flag is on.
    pub fn log_filter(&self) -> Option<String> {
        match (&self.general.log_level, self.general.debug) {
            (Some(level), _) => Some(level.clone()),
            (None, Some(true)) => Some("debug".to_string()),
            _ => None,
        }
    }

    /// Delays handed to the controller.
    pub fn to_timings(&self) -> Timings {
        Timings {
            hover_intent: Duration::from_millis(
                self.timing.hover_intent_delay_ms.unwrap_or(HOVER_INTENT_DELAY_MS),
            ),
            layout_settle: Duration::from_millis(
                self.timing.layout_settle_delay_ms.unwrap_or(LAYOUT_SETTLE_DELAY_MS),
            ),
        }
    }
}

/// Registry for managing menu settings.
pub struct SettingsRegistry {
    settings: MenuSettings,
}

impl SettingsRegistry {
    /// Create a registry holding only the built-in defaults.
    pub fn with_defaults() -> Self {
        Self {
            settings: MenuSettings::defaults(),
        }
    }

    /// Create a new SettingsRegistry and load settings from standard locations.
    pub async fn new() -> Result<Self> {
        let mut registry = Self::with_defaults();
        registry.load().await?;
        Ok(registry)
    }

    /// Load settings from standard locations in precedence order.
    ///
    /// Order (later overrides earlier):
    /// 1. System Data: /usr/share/megamenu/menu.toml (and XDG_DATA_DIRS)
    /// 2. System Config: /etc/xdg/megamenu/menu.toml (and XDG_CONFIG_DIRS)
    /// 3. User Config: ~/.config/megamenu/menu.toml (XDG_CONFIG_HOME)
    /// 4. The `MEGAMENU_HOVER_DELAY` environment variable
    pub async fn load(&mut self) -> Result<()> {
        let xdg_dirs = BaseDirectories::with_prefix("megamenu")?;
        let filename = "menu.toml";

        for path in xdg_dirs.find_data_files(filename).rev() {
            self.load_file(&path).await;
        }

        for path in xdg_dirs.find_config_files(filename).rev() {
            self.load_file(&path).await;
        }

        if let Some(user_config_path) = xdg_dirs.find_config_file(filename) {
            self.load_file(&user_config_path).await;
        } else {
            let user_config_path = xdg_dirs.get_config_home().join(filename);
            if user_config_path.exists() {
                self.load_file(&user_config_path).await;
            }
        }

        self.apply_env_override(std::env::var(HOVER_DELAY_ENV).ok().as_deref());
        Ok(())
    }

    async fn load_file(&mut self, path: &Path) {
        log::info!("Loading menu settings from: {:?}", path);
        match fs::read_to_string(path).await {
            Ok(content) => match MenuSettings::from_toml(&content) {
                Ok(loaded) => self.merge(loaded),
                Err(e) => {
                    log::error!("Failed to parse settings file {:?}: {}", path, e);
                },
            },
            Err(e) => {
                log::warn!("Failed to read settings file {:?}: {}", path, e);
            },
        }
    }

    /// Apply the value of [HOVER_DELAY_ENV], if any. Unparsable values are
    /// logged and ignored.
    pub fn apply_env_override(&mut self, value: Option<&str>) {
        let Some(value) = value else { return };
        match value.trim().parse::<u64>() {
            Ok(ms) => {
                log::debug!("{} overrides hover delay: {}ms", HOVER_DELAY_ENV, ms);
                self.settings.timing.hover_intent_delay_ms = Some(ms);
            },
            Err(e) => {
                log::warn!("Ignoring {}={:?}: {}", HOVER_DELAY_ENV, value, e);
            },
        }
    }

    /// Merge loaded settings into the current ones. Fields set in `other`
    /// win, including explicit `false`.
    fn merge(&mut self, other: MenuSettings) {
        if let Some(debug) = other.general.debug {
            self.settings.general.debug = Some(debug);
        }
        if other.general.log_level.is_some() {
            self.settings.general.log_level = other.general.log_level;
        }

        if let Some(ms) = other.timing.hover_intent_delay_ms {
            self.settings.timing.hover_intent_delay_ms = Some(ms);
        }
        if let Some(ms) = other.timing.layout_settle_delay_ms {
            self.settings.timing.layout_settle_delay_ms = Some(ms);
        }

        self.settings.other.extend(other.other);
    }

    /// Get the current settings.
    pub fn get(&self) -> &MenuSettings {
        &self.settings
    }

    /// Shortcut for `get().to_timings()`.
    pub fn timings(&self) -> Timings {
        self.settings.to_timings()
    }

    /// Load settings from multiple custom paths asynchronously.
    ///
    /// Every path is attempted; one result is returned per path.
    pub async fn load_from_paths_async(&mut self, paths: Vec<PathBuf>) -> Vec<Result<()>> {
        let mut results = Vec::new();

        for path in paths {
            let result = async {
                let content = fs::read_to_string(&path).await.map_err(|e| {
                    anyhow::anyhow!("Failed to read settings file {:?}: {}", path, e)
                })?;

                let loaded = MenuSettings::from_toml(&content).map_err(|e| {
                    anyhow::anyhow!("Failed to parse settings file {:?}: {}", path, e)
                })?;

                self.merge(loaded);
                Ok(())
            }
            .await;

            results.push(result);
        }

        results
    }

    /// Reset to defaults and re-run the full load process.
    pub async fn reload_async(&mut self) -> Result<()> {
        *self = Self::with_defaults();
        self.load().await
    }
}
