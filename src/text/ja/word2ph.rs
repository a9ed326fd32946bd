// text/ja/word2ph.rs
use serde::{Deserialize, Serialize};

use crate::text::ja::frontend::{LexicalNode, Pronunciation};

/// Alignment from source characters (or marks) to phoneme counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordToPhoneme {
    pub word: Vec<String>,
    pub ph: Vec<usize>,
}

impl WordToPhoneme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, word: impl Into<String>, ph: usize) {
        self.word.push(word.into());
        self.ph.push(ph);
    }

    /// Total number of phonemes recorded.
    pub fn total(&self) -> usize {
        self.ph.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.word.iter().map(String::as_str).zip(self.ph.iter().copied())
    }

    /// Spreads `total` phonemes over the characters of `surface`.
    ///
    /// The frontend only reports counts per lexical unit, so every character
    /// gets an even share and the leftmost `total % len` characters take one
    /// extra phoneme each.
    pub fn distribute(&mut self, surface: &str, total: usize) {
        let len = surface.chars().count();
        if len <= 1 {
            self.push(surface, total);
            return;
        }
        let base = total / len;
        let remainder = total % len;
        for (j, c) in surface.chars().enumerate() {
            self.push(c, if j < remainder { base + 1 } else { base });
        }
    }

    /// Records the per-node counts of one segment, skipping idle nodes.
    pub fn extend_nodes(&mut self, nodes: &[LexicalNode], counts: &[usize]) {
        for (node, &count) in nodes.iter().zip(counts) {
            if node.pron == Pronunciation::Idle {
                continue;
            }
            self.distribute(&node.surface, count);
        }
    }
}
