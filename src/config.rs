//! Extraction configuration
//!
//! Loaded from YAML, e.g.
//!
//! ```yaml
//! missing_values: "null"   # or "sentinel" (default)
//! ```

use crate::error::{ExtractError, ExtractResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// How failed lookups are rendered in the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingValuePolicy {
    /// Sentinel strings such as "No such currency defined"
    #[default]
    Sentinel,
    /// JSON/YAML `null`
    Null,
}

impl MissingValuePolicy {
    pub(crate) fn sentinel(self, text: &str) -> Value {
        match self {
            MissingValuePolicy::Sentinel => Value::String(text.to_string()),
            MissingValuePolicy::Null => Value::Null,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    pub missing_values: MissingValuePolicy,
}

impl ExtractConfig {
    pub fn from_yaml_str(content: &str) -> ExtractResult<Self> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_yaml_file(path: &Path) -> ExtractResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ExtractError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load from an optional path, falling back to defaults
    pub fn load(path: Option<&Path>) -> ExtractResult<Self> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }
}
