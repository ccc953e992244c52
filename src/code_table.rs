//! Code table derivation from a Huffman tree.

use std::collections::BTreeMap;

use crate::tree::{HuffNode, HuffmanTree};

/// Symbol → codeword bits (`false` = 0 = left edge).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Vec<bool>>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        match tree.root() {
            // A lone leaf would otherwise get the empty path, which can't be decoded.
            HuffNode::Leaf { symbol, .. } => {
                codes.insert(*symbol, vec![false]);
            }
            root => build_codes(root, Vec::new(), &mut codes),
        }
        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&[bool]> {
        self.codes.get(&symbol).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> + '_ {
        self.codes.iter().map(|(&s, code)| (s, code.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn build_codes(node: &HuffNode, prefix: Vec<bool>, codes: &mut BTreeMap<u8, Vec<bool>>) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, prefix);
        }
        HuffNode::Internal { left, right, .. } => {
            let mut p = prefix.clone();
            p.push(false);
            build_codes(left, p, codes);
            let mut p = prefix;
            p.push(true);
            build_codes(right, p, codes);
        }
    }
}
