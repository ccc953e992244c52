//! Error types for huffpack

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("cannot open input {}: {source}", path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open output {}: {source}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("empty input")]
    EmptyInput,

    #[error("input of {size} bytes exceeds the configured limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The payload ran out while the decoder still owed symbols or sat
    /// part-way down the tree.
    #[error("payload ended after {decoded} of {expected} symbols")]
    DecodeTermination { decoded: u64, expected: u64 },

    #[error("invalid codeword at bit {bit}")]
    InvalidCodeword { bit: u64 },

    #[error("{bits} unexpected bits after the last symbol")]
    TrailingPayload { bits: u64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        CodecError::MalformedHeader(msg.into())
    }
}
