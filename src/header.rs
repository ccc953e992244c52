//! Container header: the frequency table and the payload padding count.
//!
//! Two layouts exist. The binary layout is a magic tag and version byte
//! followed by a bincode record with a length-prefixed entry list. The text
//! layout is line oriented:
//!
//! ```text
//! <n>\n
//! <symbol byte> <count>\n     (n times, ascending symbol order)
//! <padding>\n
//! ```
//!
//! The text layout is read in lockstep (one raw byte, a space, a decimal, a
//! newline), so symbols that look like digits or delimiters still parse.

use std::io;

use bincode::Options;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::HeaderFormat;
use crate::error::CodecError;
use crate::frequency::FrequencyTable;

pub const MAGIC: &[u8; 3] = b"HUF";
pub const VERSION: u8 = 1;

/// Largest possible binary record: u64 length, 256 × (u8, u64), padding u8.
const MAX_BINARY_RECORD: u64 = 8 + 256 * 9 + 1;

/// Longest decimal a u64 can need.
const MAX_DIGITS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub frequencies: FrequencyTable,
    pub padding: u8,
}

#[derive(Serialize, Deserialize)]
struct WireHeader {
    entries: Vec<(u8, u64)>,
    padding: u8,
}

fn wire_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .with_limit(MAX_BINARY_RECORD)
}

impl Header {
    pub fn new(frequencies: FrequencyTable, padding: u8) -> Self {
        Self {
            frequencies,
            padding,
        }
    }

    /// Append the encoded header to `out`.
    pub fn write(&self, format: HeaderFormat, out: &mut Vec<u8>) -> Result<(), CodecError> {
        if self.padding > 7 {
            return Err(CodecError::malformed(format!(
                "padding {} out of range",
                self.padding
            )));
        }
        let start = out.len();
        match format {
            HeaderFormat::Binary => {
                out.extend_from_slice(MAGIC);
                out.push(VERSION);
                let wire = WireHeader {
                    entries: self.frequencies.iter().collect(),
                    padding: self.padding,
                };
                wire_options()
                    .serialize_into(&mut *out, &wire)
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            }
            HeaderFormat::Text => {
                out.extend_from_slice(format!("{}\n", self.frequencies.distinct()).as_bytes());
                for (symbol, count) in self.frequencies.iter() {
                    out.push(symbol);
                    out.extend_from_slice(format!(" {count}\n").as_bytes());
                }
                out.extend_from_slice(format!("{}\n", self.padding).as_bytes());
            }
        }
        trace!(?format, bytes = out.len() - start, "wrote header");
        Ok(())
    }

    /// Parse a header from the front of `input`, returning it with the payload that follows.
    pub fn read(input: &[u8]) -> Result<(Header, &[u8]), CodecError> {
        match Self::detect(input)? {
            HeaderFormat::Binary => Self::read_binary(&input[MAGIC.len()..]),
            HeaderFormat::Text => TextReader { input, pos: 0 }.read(),
        }
    }

    /// Identify which layout a container uses.
    pub fn detect(input: &[u8]) -> Result<HeaderFormat, CodecError> {
        if input.starts_with(MAGIC) {
            Ok(HeaderFormat::Binary)
        } else if input.first().is_some_and(u8::is_ascii_digit) {
            Ok(HeaderFormat::Text)
        } else if input.is_empty() {
            Err(CodecError::malformed("container is empty"))
        } else {
            Err(CodecError::malformed("unrecognized header"))
        }
    }

    fn read_binary(input: &[u8]) -> Result<(Header, &[u8]), CodecError> {
        let (&version, mut rest) = input
            .split_first()
            .ok_or_else(|| CodecError::malformed("missing version"))?;
        if version != VERSION {
            return Err(CodecError::malformed(format!("unsupported version {version}")));
        }
        let wire: WireHeader = wire_options()
            .deserialize_from(&mut rest)
            .map_err(|e| CodecError::malformed(e.to_string()))?;
        check_symbol_count(wire.entries.len() as u64)?;
        check_padding(u64::from(wire.padding))?;
        let frequencies = FrequencyTable::from_entries(wire.entries)?;
        Ok((Header::new(frequencies, wire.padding), rest))
    }
}

fn check_symbol_count(n: u64) -> Result<(), CodecError> {
    if n == 0 || n > 256 {
        return Err(CodecError::malformed(format!("implausible symbol count {n}")));
    }
    Ok(())
}

fn check_padding(padding: u64) -> Result<(), CodecError> {
    if padding > 7 {
        return Err(CodecError::malformed(format!("padding {padding} out of range")));
    }
    Ok(())
}

struct TextReader<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> TextReader<'a> {
    fn read(mut self) -> Result<(Header, &'a [u8]), CodecError> {
        let n = self.decimal()?;
        self.expect(b'\n')?;
        check_symbol_count(n)?;

        let mut entries = Vec::with_capacity(n as usize);
        for _ in 0..n {
            let symbol = self.byte()?;
            self.expect(b' ')?;
            let count = self.decimal()?;
            self.expect(b'\n')?;
            entries.push((symbol, count));
        }

        let padding = self.decimal()?;
        self.expect(b'\n')?;
        check_padding(padding)?;

        let frequencies = FrequencyTable::from_entries(entries)?;
        let input = self.input;
        Ok((Header::new(frequencies, padding as u8), &input[self.pos..]))
    }

    fn byte(&mut self) -> Result<u8, CodecError> {
        let b = *self
            .input
            .get(self.pos)
            .ok_or_else(|| CodecError::malformed("truncated header"))?;
        self.pos += 1;
        Ok(b)
    }

    fn expect(&mut self, want: u8) -> Result<(), CodecError> {
        let got = self.byte()?;
        if got != want {
            return Err(CodecError::malformed(format!(
                "expected {:?} at offset {}, found {:?}",
                want as char,
                self.pos - 1,
                got as char
            )));
        }
        Ok(())
    }

    fn decimal(&mut self) -> Result<u64, CodecError> {
        let digits = self.input[self.pos..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            return Err(if self.pos >= self.input.len() {
                CodecError::malformed("truncated header")
            } else {
                CodecError::malformed(format!("expected a number at offset {}", self.pos))
            });
        }
        if digits > MAX_DIGITS {
            return Err(CodecError::malformed(format!("number too long at offset {}", self.pos)));
        }
        let text = &self.input[self.pos..self.pos + digits];
        let value = text.iter().try_fold(0u64, |acc, &d| {
            acc.checked_mul(10)?.checked_add(u64::from(d - b'0'))
        });
        let value = value.ok_or_else(|| {
            CodecError::malformed(format!("number overflows at offset {}", self.pos))
        })?;
        self.pos += digits;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Header {
        let freqs = FrequencyTable::from_entries(vec![
            (b'\n', 4),
            (b' ', 1),
            (b'0', 2_147_483_647),
            (b'7', 1),
            (0xFF, 99),
        ])
        .unwrap();
        Header::new(freqs, 5)
    }

    fn encoded(header: &Header, format: HeaderFormat) -> Vec<u8> {
        let mut out = Vec::new();
        header.write(format, &mut out).unwrap();
        out
    }

    #[test]
    fn test_roundtrip_both_layouts() {
        let header = sample();
        for format in [HeaderFormat::Binary, HeaderFormat::Text] {
            let mut bytes = encoded(&header, format);
            bytes.extend_from_slice(&[0xAB, 0xCD]);
            assert_eq!(Header::detect(&bytes).unwrap(), format);
            let (read, payload) = Header::read(&bytes).unwrap();
            assert_eq!(read, header, "{format:?}");
            assert_eq!(payload, &[0xAB, 0xCD]);
        }
    }

    #[test]
    fn test_text_layout_bytes() {
        let freqs = FrequencyTable::from_bytes(b"aaabbc").unwrap();
        let bytes = encoded(&Header::new(freqs, 7), HeaderFormat::Text);
        assert_eq!(bytes, b"3\na 3\nb 2\nc 1\n7\n");
    }

    #[test]
    fn test_binary_layout_bytes() {
        let freqs = FrequencyTable::from_bytes(b"x").unwrap();
        let bytes = encoded(&Header::new(freqs, 7), HeaderFormat::Binary);
        let mut want = b"HUF\x01".to_vec();
        want.extend_from_slice(&1u64.to_le_bytes());
        want.push(b'x');
        want.extend_from_slice(&1u64.to_le_bytes());
        want.push(7);
        assert_eq!(bytes, want);
    }

    #[test]
    fn test_truncated_header_rejected() {
        for format in [HeaderFormat::Binary, HeaderFormat::Text] {
            let bytes = encoded(&sample(), format);
            for cut in 1..bytes.len() {
                let err = Header::read(&bytes[..cut]).unwrap_err();
                assert!(
                    matches!(err, CodecError::MalformedHeader(_)),
                    "{format:?} cut at {cut}: {err}"
                );
            }
        }
    }

    #[test]
    fn test_implausible_counts_rejected() {
        assert!(Header::read(b"0\n0\n").is_err());
        assert!(Header::read(b"257\n").is_err());
        assert!(Header::read(b"99999999999999999999999\n").is_err());

        let mut bytes = b"HUF\x01".to_vec();
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        assert!(matches!(
            Header::read(&bytes),
            Err(CodecError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_overflowing_counts_rejected() {
        let text = b"2\na 9223372036854775808\nb 9223372036854775808\n0\n";
        assert!(matches!(
            Header::read(text),
            Err(CodecError::MalformedHeader(_))
        ));

        let mut bytes = b"HUF\x01".to_vec();
        bytes.extend_from_slice(&2u64.to_le_bytes());
        for symbol in [b'a', b'b'] {
            bytes.push(symbol);
            bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        }
        bytes.push(0);
        assert!(matches!(
            Header::read(&bytes),
            Err(CodecError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_bad_padding_rejected() {
        assert!(Header::read(b"1\na 1\n8\n").is_err());
        let mut bytes = encoded(&sample(), HeaderFormat::Binary);
        *bytes.last_mut().unwrap() = 8;
        assert!(Header::read(&bytes).is_err());
        let freqs = FrequencyTable::from_bytes(b"a").unwrap();
        assert!(Header::new(freqs, 8)
            .write(HeaderFormat::Text, &mut Vec::new())
            .is_err());
    }

    #[test]
    fn test_unknown_leading_bytes() {
        assert!(Header::read(b"").is_err());
        assert!(Header::read(b"\x00\x01").is_err());
        assert!(Header::read(b"HUF\x02").is_err());
    }
}
