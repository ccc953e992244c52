//! Symbol frequency analysis.

use crate::error::CodecError;

/// Occurrence count for every byte value. A zero count means the symbol is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        if data.is_empty() {
            return Err(CodecError::EmptyInput);
        }
        let mut counts = [0u64; 256];
        for &b in data {
            counts[b as usize] += 1;
        }
        Ok(Self { counts })
    }

    /// Rebuild a table from `(symbol, count)` pairs, as read back from a header.
    ///
    /// The counts must sum to a value that fits in a `u64`.
    pub fn from_entries<I>(entries: I) -> Result<Self, CodecError>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = [0u64; 256];
        let mut last: Option<u8> = None;
        let mut total = 0u64;
        for (symbol, count) in entries {
            if count == 0 {
                return Err(CodecError::malformed(format!("symbol {symbol} has a zero count")));
            }
            if last.is_some_and(|prev| symbol <= prev) {
                return Err(CodecError::malformed(format!(
                    "symbol {symbol} is duplicated or out of order"
                )));
            }
            total = total
                .checked_add(count)
                .ok_or_else(|| CodecError::malformed("frequency total overflows"))?;
            counts[symbol as usize] = count;
            last = Some(symbol);
        }
        if last.is_none() {
            return Err(CodecError::malformed("no symbols"));
        }
        Ok(Self { counts })
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts, which is the length of the data the table describes.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Shannon entropy in bits per byte.
    pub fn entropy_bits(&self) -> f64 {
        let len = self.total() as f64;
        let mut entropy = 0.0;
        for (_, count) in self.iter() {
            let p = count as f64 / len;
            entropy -= p * p.log2();
        }
        entropy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_worked_example() {
        let table = FrequencyTable::from_bytes(b"aaabbc").unwrap();
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(b'a', 3), (b'b', 2), (b'c', 1)]);
        assert_eq!(table.total(), 6);
        assert_eq!(table.distinct(), 3);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            FrequencyTable::from_bytes(b""),
            Err(CodecError::EmptyInput)
        ));
    }

    #[test]
    fn test_iteration_is_ascending() {
        let table = FrequencyTable::from_bytes(&[0xFF, 0x00, 0x80, 0x7F, 0x00]).unwrap();
        let symbols: Vec<u8> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![0x00, 0x7F, 0x80, 0xFF]);
    }

    #[test]
    fn test_from_entries_rejects_bad_tables() {
        assert!(FrequencyTable::from_entries(vec![]).is_err());
        assert!(FrequencyTable::from_entries(vec![(1, 0)]).is_err());
        assert!(FrequencyTable::from_entries(vec![(2, 1), (1, 1)]).is_err());
        assert!(FrequencyTable::from_entries(vec![(2, 1), (2, 1)]).is_err());
        assert!(matches!(
            FrequencyTable::from_entries(vec![(1, 1 << 63), (2, 1 << 63)]),
            Err(CodecError::MalformedHeader(_))
        ));
        let table = FrequencyTable::from_entries(vec![(1, 5), (9, 2)]).unwrap();
        assert_eq!(table.get(1), 5);
        assert_eq!(table.get(9), 2);
    }

    #[test]
    fn test_entropy() {
        let uniform = FrequencyTable::from_bytes(&[42u8; 100]).unwrap();
        assert!(uniform.entropy_bits() < 0.01, "single symbol should have ~0 entropy");
        let two = FrequencyTable::from_bytes(b"abab").unwrap();
        assert!((two.entropy_bits() - 1.0).abs() < 1e-9);
    }
}
