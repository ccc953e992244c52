//! Bit packing and unpacking of the payload.
//!
//! Bits are stored most-significant first within each byte. The final byte is
//! filled with zero bits whose count travels in the header as `padding`.

use std::io;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::code_table::CodeTable;
use crate::error::CodecError;

/// Byte-aligned codeword stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    pub bytes: Vec<u8>,
    /// Zero bits appended to the last byte, always in `0..=7`.
    pub padding: u8,
    /// Codeword bits before padding.
    pub data_bits: u64,
}

/// Concatenate the code of every byte of `data` and pack the result into bytes.
pub fn pack(data: &[u8], codes: &CodeTable) -> Result<PackedBits, CodecError> {
    let mut bytes = Vec::with_capacity(data.len() / 2);
    let mut data_bits = 0u64;
    {
        let mut w = BitWriter::endian(&mut bytes, BigEndian);
        for &byte in data {
            let code = codes.get(byte).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("byte {byte} not in code table"),
                )
            })?;
            for &bit in code {
                w.write_bit(bit)?;
            }
            data_bits += code.len() as u64;
        }
        w.byte_align()?;
    }
    let padding = ((8 - data_bits % 8) % 8) as u8;
    Ok(PackedBits {
        bytes,
        padding,
        data_bits,
    })
}

/// Reads payload bits back, stopping before the trailing padding.
pub struct BitUnpacker<'a> {
    reader: BitReader<&'a [u8], BigEndian>,
    total: u64,
    position: u64,
}

impl<'a> BitUnpacker<'a> {
    pub fn new(payload: &'a [u8], padding: u8) -> Result<Self, CodecError> {
        if padding > 7 {
            return Err(CodecError::malformed(format!("padding {padding} out of range")));
        }
        let available = payload.len() as u64 * 8;
        let total = available.checked_sub(u64::from(padding)).ok_or_else(|| {
            CodecError::malformed(format!("padding {padding} exceeds an empty payload"))
        })?;
        Ok(Self {
            reader: BitReader::endian(payload, BigEndian),
            total,
            position: 0,
        })
    }

    /// Next data bit, or `None` once only padding remains.
    pub fn next_bit(&mut self) -> io::Result<Option<bool>> {
        if self.position == self.total {
            return Ok(None);
        }
        let bit = self.reader.read_bit()?;
        self.position += 1;
        Ok(Some(bit))
    }

    /// Index of the next bit to be read.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn remaining(&self) -> u64 {
        self.total - self.position
    }
}
