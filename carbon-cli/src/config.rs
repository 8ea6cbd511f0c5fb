use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use carbon_core::gateway::GatewayConfig;
use carbon_core::i18n::Locale;

/// Overrides `gateway.base_url` when set.
pub const API_URL_ENV: &str = "CARBON_API_URL";

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "carbon.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported locale '{0}' (expected one of: en, zh)")]
    UnknownLocale(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or any `EnvFilter` directive. `RUST_LOG` wins over it.
    pub level: String,
    /// Append log records to this file as well.
    pub file: Option<PathBuf>,
    /// Echo log records on stdout, interleaved with the screens.
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            stdout: true,
        }
    }
}

/// Everything `carbon.toml` may contain.
///
/// ```toml
/// locale = "en"
///
/// [gateway]
/// base_url = "http://127.0.0.1:5000"
/// timeout_ms = 10000
///
/// [logging]
/// level = "debug"
/// file = "carbon.log"
/// stdout = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub locale: Option<String>,
    pub gateway: GatewayConfig,
    pub logging: LoggingConfig,
}

impl CliConfig {
    pub fn from_toml_str(
        text: &str,
        origin: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&text, path)
    }

    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// used if present and built-in defaults otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Applies environment overrides through `lookup` (normally
    /// `std::env::var`). Blank values are ignored.
    pub fn apply_env<F>(
        &mut self,
        lookup: F,
    ) where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.gateway.base_url = url.trim().to_string();
        }
    }

    pub fn locale(&self) -> Result<Locale, ConfigError> {
        match self.locale.as_deref() {
            None => Ok(Locale::default()),
            Some(tag) => Locale::parse(tag).ok_or_else(|| ConfigError::UnknownLocale(tag.to_string())),
        }
    }
}
