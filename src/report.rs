//! Statistics about a finished compression.

use serde::{Deserialize, Serialize};

use crate::config::HeaderFormat;
use crate::error::CodecError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionReport {
    pub header_format: HeaderFormat,
    pub original_size: usize,
    pub compressed_size: usize,
    pub header_size: usize,
    pub payload_bits: u64,
    pub padding: u8,
    pub distinct_symbols: usize,
    /// Shannon entropy of the input in bits per byte.
    pub entropy_bits: f64,
    /// compressed_size / original_size
    pub ratio: f64,
}

impl CompressionReport {
    pub fn to_json(&self) -> Result<String, CodecError> {
        serde_json::to_string_pretty(self).map_err(|e| CodecError::Serialization(e.to_string()))
    }

    /// Average codeword length in bits per input byte.
    pub fn bits_per_symbol(&self) -> f64 {
        self.payload_bits as f64 / self.original_size as f64
    }
}
