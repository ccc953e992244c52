//! Configuration for huffpack

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Wire layout of the container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderFormat {
    /// Magic-tagged, length-prefixed binary header.
    #[default]
    Binary,
    /// Line-oriented decimal header, kept for containers written by older tools.
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Header layout written by `compress`. Decompression accepts either.
    pub header_format: HeaderFormat,
    pub max_input_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            header_format: HeaderFormat::Binary,
            max_input_size: 100 * 1024 * 1024, // 100 MB
        }
    }
}

impl CodecConfig {
    pub fn from_json(text: &str) -> Result<Self, CodecError> {
        serde_json::from_str(text).map_err(|e| CodecError::Config(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CodecError> {
        let text = std::fs::read_to_string(path).map_err(|source| CodecError::InputOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}
