//! Tree-walking decoder.

use tracing::debug;

use crate::bits::BitUnpacker;
use crate::error::CodecError;
use crate::tree::{HuffNode, HuffmanTree};

/// Decode `expected` symbols from `bits` by walking `tree`.
///
/// Every payload bit up to the padding must be consumed by a whole codeword:
/// running dry first is a [`CodecError::DecodeTermination`], and leftover
/// bits are a [`CodecError::TrailingPayload`].
pub fn decode(
    tree: &HuffmanTree,
    bits: &mut BitUnpacker<'_>,
    expected: u64,
) -> Result<Vec<u8>, CodecError> {
    // Every symbol costs at least one bit.
    if expected > bits.remaining() {
        debug!(expected, available = bits.remaining(), "payload too short for header counts");
        return Err(CodecError::DecodeTermination {
            decoded: 0,
            expected,
        });
    }
    let mut output = Vec::with_capacity(expected as usize);
    let root = tree.root();
    let mut current = root;
    let mut decoded = 0u64;

    while decoded < expected {
        let bit_index = bits.position();
        let Some(bit) = bits.next_bit()? else {
            debug!(decoded, expected, mid_path = !std::ptr::eq(current, root), "payload exhausted");
            return Err(CodecError::DecodeTermination { decoded, expected });
        };

        current = match current {
            // Single-symbol tree: each symbol is the one-bit code 0.
            HuffNode::Leaf { .. } if bit => {
                return Err(CodecError::InvalidCodeword { bit: bit_index });
            }
            HuffNode::Leaf { .. } => current,
            HuffNode::Internal { left, right, .. } => {
                if bit {
                    right.as_ref()
                } else {
                    left.as_ref()
                }
            }
        };

        if let HuffNode::Leaf { symbol, .. } = current {
            output.push(*symbol);
            decoded += 1;
            current = root;
        }
    }

    if bits.remaining() > 0 {
        return Err(CodecError::TrailingPayload {
            bits: bits.remaining(),
        });
    }
    Ok(output)
}
