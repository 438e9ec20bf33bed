//! Settings file for the `debt-planner` binary.
//!
//! ```toml
//! extra_payment = "100"
//! strategy = "SNOWBALL"
//! log_level = "info"
//! log_file = "debt-planner.log"
//!
//! [store]
//! backend = "sqlite"
//! connection_string = "debts.db"
//! ```
//!
//! Every key is optional. Command-line flags win over file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use debt_core::db::StoreConfig;
use debt_core::{DEFAULT_EXTRA_PAYMENT, Strategy};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_SETTINGS_FILE: &str = "debt-planner.toml";
pub const DEFAULT_DATABASE: &str = "debts.db";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub extra_payment: Decimal,
    pub strategy: Strategy,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub store: StoreConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extra_payment: DEFAULT_EXTRA_PAYMENT,
            strategy: Strategy::default(),
            log_level: "info".to_string(),
            log_file: None,
            store: StoreConfig {
                backend: "sqlite".to_string(),
                connection_string: DEFAULT_DATABASE.to_string(),
            },
        }
    }
}

/// Values given on the command line. `None` keeps the settings value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub extra_payment: Option<Decimal>,
    pub strategy: Option<Strategy>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub backend: Option<String>,
    pub database: Option<String>,
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).context("Failed to parse settings")
    }

    /// Reads settings from `path`, or from [`DEFAULT_SETTINGS_FILE`] in the
    /// working directory when `path` is `None`.
    ///
    /// A missing default file yields the built-in defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
        };

        if !explicit && !path.exists() {
            debug!("no settings file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file '{}'", path.display()))?;
        let settings = Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid settings file '{}'", path.display()))?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn with_overrides(
        mut self,
        overrides: SettingsOverrides,
    ) -> Self {
        if let Some(extra) = overrides.extra_payment {
            self.extra_payment = extra;
        }
        if let Some(strategy) = overrides.strategy {
            self.strategy = strategy;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if let Some(file) = overrides.log_file {
            self.log_file = Some(file);
        }
        if let Some(backend) = overrides.backend {
            self.store.backend = backend;
        }
        if let Some(database) = overrides.database {
            self.store.connection_string = database;
        }
        self
    }
}
