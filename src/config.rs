//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/pricetree/pricetree.toml`
//! 3. Local config: `<dir>/.pricetree.toml`
//! 4. Environment variables: `PRICETREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::PriceFormat;

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub currency: Option<String>,
    pub precision: Option<usize>,
    pub show_prices: Option<bool>,
}

/// Unified configuration for pricetree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Prefix written before every price (default: none)
    pub currency: String,
    /// Decimal places when printing prices (default: 2)
    pub precision: usize,
    /// Show prices next to names in tree output (default: true)
    pub show_prices: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: String::new(),
            precision: 2,
            show_prices: true,
        }
    }
}

/// Get the XDG config directory for pricetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pricetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("pricetree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".pricetree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    pub fn price_format(&self) -> PriceFormat {
        PriceFormat {
            currency: self.currency.clone(),
            precision: self.precision,
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            currency: overlay
                .currency
                .clone()
                .unwrap_or_else(|| self.currency.clone()),
            precision: overlay.precision.unwrap_or(self.precision),
            show_prices: overlay.show_prices.unwrap_or(self.show_prices),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.pricetree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply PRICETREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("PRICETREE").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("currency") {
            settings.currency = val;
        }
        if let Ok(val) = config.get_int("precision") {
            settings.precision = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("PRICETREE_PRECISION must not be negative: {}", val),
            })?;
        }
        if let Ok(val) = config.get_bool("show_prices") {
            settings.show_prices = val;
        }

        Ok(settings)
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}
