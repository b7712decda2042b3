use std::{fs, io, path::Path};

use serde::{de::Error as _, Deserialize, Serialize};
use serde_json::Value;

/// Heuristic weights. Keys missing from a JSON document keep their default value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Weights {
    pub mono: f64,
    pub smooth: f64,
    pub corner: f64,
    pub empty: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            mono: 1.0,
            smooth: 0.1,
            corner: 2.0,
            empty: 2.5,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid weights: {0}")]
    Json(#[from] serde_json::Error),
}

impl Weights {
    /// Parses a JSON object holding any subset of the weight keys.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;

        if !value.is_object() {
            return Err(serde_json::Error::custom("weights must be a JSON object").into());
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;

        Self::from_json_str(&json)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    /// Number of move/spawn plies searched below the root.
    pub depth: u32,
    /// Most empty cells expanded at a chance node.
    pub sample_cap: usize,
    pub weights: Weights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            sample_cap: 6,
            weights: Weights::default(),
        }
    }
}
