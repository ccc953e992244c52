//! huffpack: lossless byte-stream compression with Huffman codes.
//!
//! A container is a header carrying the symbol frequency table and the
//! payload padding count, followed by the packed codeword bits:
//! - [`frequency`] counts symbols
//! - [`tree`] merges them into a prefix tree, deterministically
//! - [`code_table`] derives each symbol's codeword
//! - [`header`] and [`bits`] produce the container
//! - [`decoder`] walks the rebuilt tree to restore the input
//!
//! ```no_run
//! use huffpack::Codec;
//!
//! let codec = Codec::default();
//! let packed = codec.compress(b"aaabbc")?;
//! assert_eq!(codec.decompress(&packed.data)?, b"aaabbc");
//! # Ok::<(), huffpack::error::CodecError>(())
//! ```

pub mod bits;
pub mod code_table;
pub mod config;
pub mod decoder;
pub mod error;
pub mod frequency;
pub mod header;
pub mod report;
pub mod tree;

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::bits::BitUnpacker;
use crate::code_table::CodeTable;
use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::frequency::FrequencyTable;
use crate::header::Header;
use crate::report::CompressionReport;
use crate::tree::HuffmanTree;

pub use crate::config::HeaderFormat;

/// A compressed container together with statistics about it.
#[derive(Debug, Clone)]
pub struct CompressedOutput {
    pub data: Vec<u8>,
    pub report: CompressionReport,
}

/// The compressor/decompressor engine
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Create a new codec with the given configuration
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Configuration this codec was built with
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress `data` into a self-describing container.
    pub fn compress(&self, data: &[u8]) -> Result<CompressedOutput, CodecError> {
        self.check_size(data.len())?;
        let frequencies = FrequencyTable::from_bytes(data)?;
        let tree = HuffmanTree::build(&frequencies).ok_or(CodecError::EmptyInput)?;
        let codes = CodeTable::from_tree(&tree);
        let packed = bits::pack(data, &codes)?;

        let format = self.config.header_format;
        let header = Header::new(frequencies, packed.padding);
        let mut container = Vec::with_capacity(packed.bytes.len() + 64);
        header.write(format, &mut container)?;
        let header_size = container.len();
        container.extend_from_slice(&packed.bytes);

        let report = CompressionReport {
            header_format: format,
            original_size: data.len(),
            compressed_size: container.len(),
            header_size,
            payload_bits: packed.data_bits,
            padding: packed.padding,
            distinct_symbols: codes.len(),
            entropy_bits: header.frequencies.entropy_bits(),
            ratio: container.len() as f64 / data.len() as f64,
        };
        debug!(
            original = report.original_size,
            compressed = report.compressed_size,
            symbols = report.distinct_symbols,
            padding = report.padding,
            "compressed"
        );
        Ok(CompressedOutput {
            data: container,
            report,
        })
    }

    /// Restore the original bytes from a container.
    pub fn decompress(&self, container: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.check_size(container.len())?;
        let (header, payload) = Header::read(container)?;
        let tree = HuffmanTree::build(&header.frequencies)
            .ok_or_else(|| CodecError::malformed("no symbols"))?;
        let expected = header.frequencies.total();
        let mut bits = BitUnpacker::new(payload, header.padding)?;
        let output = decoder::decode(&tree, &mut bits, expected)?;
        debug!(
            payload = payload.len(),
            restored = output.len(),
            degenerate = tree.is_degenerate(),
            "decompressed"
        );
        Ok(output)
    }

    /// Compress the file at `input` into `output`.
    ///
    /// Nothing is written when compression fails.
    pub fn compress_file(&self, input: &Path, output: &Path) -> Result<CompressionReport, CodecError> {
        let data = read_input(input)?;
        let compressed = self.compress(&data)?;
        write_output(output, &compressed.data)?;
        info!(
            input = %input.display(),
            output = %output.display(),
            ratio = compressed.report.ratio,
            "compressed file"
        );
        Ok(compressed.report)
    }

    /// Decompress the container at `input` into `output`, returning the restored size.
    pub fn decompress_file(&self, input: &Path, output: &Path) -> Result<usize, CodecError> {
        let container = read_input(input)?;
        let restored = self.decompress(&container)?;
        write_output(output, &restored)?;
        info!(
            input = %input.display(),
            output = %output.display(),
            bytes = restored.len(),
            "decompressed file"
        );
        Ok(restored.len())
    }

    fn check_size(&self, size: usize) -> Result<(), CodecError> {
        let limit = self.config.max_input_size;
        if size > limit {
            return Err(CodecError::InputTooLarge { size, limit });
        }
        Ok(())
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>, CodecError> {
    let mut file = File::open(path).map_err(|source| CodecError::InputOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CodecError> {
    let mut file = File::create(path).map_err(|source| CodecError::OutputOpen {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}
