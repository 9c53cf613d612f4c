//! Top-level configuration structure.

use serde::{Deserialize, Serialize};

use crate::settings::GlobalSettings;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocfillConfig {
    #[serde(default)]
    pub synthesis: SynthesisOptions,

    #[serde(default)]
    pub render: RenderOptions,

    #[serde(default)]
    pub settings: GlobalSettings,
}

/// Knobs of the phrase synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisOptions {
    /// Only give `Is`/`Has`/`Can` method names boolean phrasing when the method
    /// actually returns a boolean. Off by default: the prefix alone decides.
    #[serde(default)]
    pub gate_boolean_prefixes: bool,

    /// Drop the conventional `I` prefix from interface names ("IUserStore").
    #[serde(default = "default_true")]
    pub strip_interface_prefix: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            gate_boolean_prefixes: false,
            strip_interface_prefix: true,
        }
    }
}

/// How documentation comments are written into the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Marker opening every documentation line.
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,

    /// Element written for declarations that inherit their documentation.
    #[serde(default = "default_inherit_marker")]
    pub inherit_marker: String,

    #[serde(default)]
    pub line_ending: LineEnding,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            comment_prefix: default_comment_prefix(),
            inherit_marker: default_inherit_marker(),
            line_ending: LineEnding::default(),
        }
    }
}

/// Line break written after each inserted comment line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Reuse the first line break found in the document.
    #[default]
    Auto,
    Lf,
    Crlf,
}

impl LineEnding {
    /// Concrete line break, falling back to `detected` for [`LineEnding::Auto`].
    pub fn resolve<'a>(self, detected: &'a str) -> &'a str {
        match self {
            LineEnding::Auto => detected,
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_comment_prefix() -> String {
    "///".to_string()
}

fn default_inherit_marker() -> String {
    "<inheritdoc/>".to_string()
}
