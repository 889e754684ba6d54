use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::Mode;
use crate::error::CalcResult;
use crate::i18n::{Localizer, Translator};

/// Trigger keywords in storage order: calculator, time, dec, bin, hex, oct.
pub const DEFAULT_TRIGGERS: [&str; 6] = ["=", "time", "dec", "bin", "hex", "oct"];

/// Upper bound for the currency cache refresh interval (one week).
const MAX_CACHE_INTERVAL: u64 = 604_800;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub currency: CurrencyConfig,
    pub time: TimeConfig,
    pub units: UnitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Either a TOML list or a comma-separated string.
    #[serde(deserialize_with = "deserialize_triggers")]
    pub triggers: Vec<String>,
    pub show_empty_placeholder: bool,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub provider: CurrencyProvider,
    pub api_key: String,
    /// Seconds between rate refreshes
    pub cache_interval: u64,
    pub default_currencies: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyProvider {
    Internal,
    Fixerio,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    pub default_cities: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitsConfig {
    pub mode: UnitsMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitsMode {
    #[default]
    Normal,
    Crazy,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            triggers: DEFAULT_TRIGGERS.iter().map(|s| s.to_string()).collect(),
            show_empty_placeholder: false,
            language: "en_US".to_string(),
        }
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            provider: CurrencyProvider::Internal,
            api_key: String::new(),
            cache_interval: 86_400,
            default_currencies: "USD,EUR,GBP,CAD".to_string(),
        }
    }
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            default_cities:
                "New York City US, London GB, Madrid ES, Vancouver CA, Athens GR".to_string(),
        }
    }
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            mode: UnitsMode::Normal,
        }
    }
}

impl CurrencyConfig {
    /// Upper-cased currency codes from `default_currencies`.
    pub fn currencies(&self) -> Vec<String> {
        split_list(&self.default_currencies)
            .map(|c| c.to_uppercase())
            .collect()
    }
}

impl TimeConfig {
    /// City entries from `default_cities`, e.g. `"London GB"`.
    pub fn cities(&self) -> Vec<String> {
        split_list(&self.default_cities).map(str::to_string).collect()
    }
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn deserialize_triggers<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Triggers {
        List(Vec<String>),
        Csv(String),
    }

    Ok(match Triggers::deserialize(deserializer)? {
        Triggers::List(list) => list,
        // An empty string means "not set", same as leaving the key out
        Triggers::Csv(csv) if csv.trim().is_empty() => GeneralConfig::default().triggers,
        Triggers::Csv(csv) => csv.split(',').map(|t| t.trim().to_string()).collect(),
    })
}

impl Config {
    /// Directory holding `config.toml` and the `lang/` overlays
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("calcany")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load config from the default path, or return defaults if not found
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`. Unreadable or invalid files are logged and
    /// replaced by defaults.
    pub fn load_from(path: &Path) -> Self {
        let mut config = if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.validate();
        config
    }

    /// Normalize and clamp config values
    fn validate(&mut self) {
        for trigger in &mut self.general.triggers {
            *trigger = trigger.trim().to_string();
        }

        self.currency.cache_interval = self.currency.cache_interval.min(MAX_CACHE_INTERVAL);

        if self.general.language.trim().is_empty() {
            self.general.language = "en_US".to_string();
        }
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> CalcResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Save config to the default path
    pub fn save(&self) -> CalcResult<()> {
        self.save_to(&Self::config_path())
    }

    /// Freeze the parts the dispatch core reads, with strings for `language`.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let localizer = Arc::new(Translator::load(&self.general.language));
        self.snapshot_with(localizer)
    }

    pub fn snapshot_with(&self, localizer: Arc<dyn Localizer>) -> Arc<Snapshot> {
        Arc::new(Snapshot::new(
            self.general.triggers.clone(),
            self.general.show_empty_placeholder,
            localizer,
        ))
    }
}

/// Read-only view of the configuration shared by every dispatch.
///
/// Built once at startup; nothing in the pipeline mutates it.
pub struct Snapshot {
    triggers: Vec<String>,
    show_empty_placeholder: bool,
    localizer: Arc<dyn Localizer>,
}

impl Snapshot {
    pub fn new(
        triggers: Vec<String>,
        show_empty_placeholder: bool,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            triggers,
            show_empty_placeholder,
            localizer,
        }
    }

    /// False when the trigger list is empty, which disables matching.
    pub fn has_triggers(&self) -> bool {
        !self.triggers.is_empty()
    }

    /// Active trigger keyword for `mode`, if any. Missing or blank slots
    /// yield `None`.
    pub fn trigger(&self, mode: Mode) -> Option<&str> {
        self.triggers
            .get(mode.storage_index())
            .map(String::as_str)
            .filter(|t| !t.trim().is_empty())
    }

    /// Keyword to show for `mode`: its trigger, or the built-in default.
    pub fn display_keyword(&self, mode: Mode) -> &str {
        self.trigger(mode).unwrap_or_else(|| mode.default_keyword())
    }

    pub fn show_empty_placeholder(&self) -> bool {
        self.show_empty_placeholder
    }

    pub fn translate(&self, key: &str, namespace: &str) -> String {
        self.localizer.translate(key, namespace)
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("triggers", &self.triggers)
            .field("show_empty_placeholder", &self.show_empty_placeholder)
            .finish_non_exhaustive()
    }
}
