//! Schema validation for loaded configuration.

use crate::config::DocfillConfig;
use crate::error::{ConfigError, Result};
use crate::settings::LOG_LEVELS;

/// Trait for pluggable config validation strategies.
pub trait ConfigValidator {
    fn validate(&self, config: &DocfillConfig) -> Result<()>;
}

/// Checks values the engine cannot work with.
///
/// ```
/// use docfill_config::{ConfigValidator, DocfillConfig, SchemaValidator};
///
/// SchemaValidator.validate(&DocfillConfig::default()).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &DocfillConfig) -> Result<()> {
        let prefix = config.render.comment_prefix.trim();
        if prefix.is_empty() {
            return Err(ConfigError::invalid("render.comment_prefix", "")
                .with_hint("Use a line comment marker such as '///'"));
        }
        if !is_doc_line_prefix(prefix) {
            return Err(ConfigError::invalid("render.comment_prefix", prefix)
                .with_hint("Documentation lines must start with exactly '///'"));
        }

        let marker = config.render.inherit_marker.trim();
        if !(marker.starts_with('<') && marker.ends_with('>')) {
            return Err(ConfigError::invalid("render.inherit_marker", marker)
                .with_hint("Use a single element such as '<inheritdoc/>'"));
        }

        if let Some(level) = &config.settings.log_level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(ConfigError::invalid("settings.log_level", level)
                    .with_hint(format!("Expected one of: {}", LOG_LEVELS.join(", "))));
            }
        }

        if config.settings.parallel_jobs == Some(0) {
            return Err(ConfigError::invalid("settings.parallel_jobs", "0")
                .with_hint("Omit the field to let the engine pick a thread count"));
        }

        Ok(())
    }
}

/// `///` followed by anything but another slash; `//` and `////` read back
/// as ordinary comments.
fn is_doc_line_prefix(prefix: &str) -> bool {
    prefix.starts_with("///") && !prefix.starts_with("////")
}

impl DocfillConfig {
    /// Runs [`SchemaValidator`] over this config.
    pub fn validate(&self) -> Result<()> {
        SchemaValidator.validate(self)
    }
}
