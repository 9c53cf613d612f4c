use std::path::Path;

use figment::{
    providers::{Env, Format as _, Json, Serialized, Toml},
    Figment,
};

use crate::config::DocfillConfig;
use crate::error::{ConfigError, Result};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "docfill.toml";

/// Prefix of environment overrides; nested keys use `__`
/// (`DOCFILL_SYNTHESIS__GATE_BOOLEAN_PREFIXES=true`).
pub const ENV_PREFIX: &str = "DOCFILL_";

impl DocfillConfig {
    /// Load configuration from every source.
    /// Priority: environment variables > config file > defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        let figment = Self::figment(config_file.as_deref())?;
        Self::from_figment(figment)
    }

    /// Layered figment for `config_file`, without extracting it.
    pub fn figment(config_file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(DocfillConfig::default()));

        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "loading docfill config file");
            figment = match format_of(path)? {
                FileFormat::Toml => figment.merge(Toml::file(path)),
                FileFormat::Json => figment.merge(Json::file(path)),
            };
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extracts and validates a config from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: DocfillConfig = figment.extract().map_err(|e| {
            ConfigError::invalid("configuration", e.to_string())
                .with_hint("Check docfill.toml syntax and field types")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document directly, without environment overrides.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: DocfillConfig = toml::from_str(source).map_err(|e| {
            ConfigError::invalid("configuration", e.to_string().trim().to_string())
        })?;
        config.validate()?;
        Ok(config)
    }
}

enum FileFormat {
    Toml,
    Json,
}

fn format_of(path: &Path) -> Result<FileFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(FileFormat::Toml),
        Some("json") => Ok(FileFormat::Json),
        Some(other) => Err(ConfigError::UnsupportedFormat(other.to_string())),
        None => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
}
