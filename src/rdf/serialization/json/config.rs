//! Codec configuration
//!
//! Plain structs with defaults, loadable from YAML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("Invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Decoder options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Reject lexical forms that violate their datatype or IRI syntax
    pub validate: bool,
    /// Rewrite lexical forms to their canonical form
    pub canonicalize: bool,
    /// Abort on the first malformed term instead of skipping the statement
    pub strict: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            validate: false,
            canonicalize: false,
            strict: true,
        }
    }
}

impl DecoderConfig {
    /// Skip-and-continue decoding with validation on
    pub fn lenient_validating() -> Self {
        Self {
            validate: true,
            canonicalize: false,
            strict: false,
        }
    }
}

/// Encoder options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Pretty-print the emitted document
    pub pretty: bool,
}

/// Decoder and encoder options together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Decoder options
    pub decoder: DecoderConfig,
    /// Encoder options
    pub encoder: EncoderConfig,
}

impl CodecConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Load a YAML file
    pub fn from_yaml_file(path: &Path) -> ConfigResult<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&input)
    }
}
