//! Configuration for the docfill documentation engine.
//!
//! [`DocfillConfig`] is plain serde data with defaults for every field, so an
//! empty config file (or none at all) is valid. [`DocfillConfig::load`] layers
//! defaults, a `docfill.toml` / `docfill.json` file and `DOCFILL_` environment
//! variables with figment.

pub mod config;
pub mod error;
pub mod loading;
pub mod settings;
pub mod validation;

pub use config::*;
pub use error::*;
pub use loading::DEFAULT_CONFIG_FILE;
pub use settings::*;
pub use validation::{ConfigValidator, SchemaValidator};
