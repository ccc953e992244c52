//! Huffman tree construction.
//!
//! The container carries only symbol frequencies, so the decoder rebuilds the
//! tree with this same routine. Merge order therefore has to be a pure
//! function of the frequency table.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn freq(&self) -> u64 {
        match self {
            HuffNode::Leaf { freq, .. } | HuffNode::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    fn merge(left: HuffNode, right: HuffNode) -> HuffNode {
        HuffNode::Internal {
            freq: left.freq() + right.freq(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Heap slot ordered by frequency, then by creation sequence.
///
/// Leaves take sequence numbers 0..n in ascending symbol order and every
/// merged node takes the next free number, which pins down tie-breaking.
#[derive(Debug)]
struct HeapEntry {
    freq: u64,
    seq: usize,
    node: HuffNode,
}

impl Eq for HeapEntry {}
impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Build the tree for a frequency table. Returns `None` when the table is empty.
    pub fn build(table: &FrequencyTable) -> Option<Self> {
        let mut heap: BinaryHeap<HeapEntry> = table
            .iter()
            .enumerate()
            .map(|(seq, (symbol, freq))| HeapEntry {
                freq,
                seq,
                node: HuffNode::Leaf { symbol, freq },
            })
            .collect();
        let mut next_seq = heap.len();

        while heap.len() > 1 {
            let left = heap.pop()?;
            let right = heap.pop()?;
            let node = HuffNode::merge(left.node, right.node);
            heap.push(HeapEntry {
                freq: node.freq(),
                seq: next_seq,
                node,
            });
            next_seq += 1;
        }

        let root = heap.pop()?.node;
        trace!(leaves = root.leaf_count(), weight = root.freq(), "built huffman tree");
        Some(Self { root })
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// True when the input held a single distinct symbol.
    pub fn is_degenerate(&self) -> bool {
        self.root.is_leaf()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}
