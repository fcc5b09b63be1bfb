//! Aligned paragraph pairs and the training triples extracted from them.

use serde::{Deserialize, Serialize};

/// Marker placed at position 0 of both sides of every paragraph.
pub const START_MARKER: &str = "^";

/// A paragraph of characters and the pinyin reading of each one.
///
/// Position `i` on both sides refers to the same unit. Non-alphabetic
/// characters carry themselves (or the start marker) as their "reading".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParagraphPair {
    pub chars: Vec<String>,
    pub pinyins: Vec<String>,
}

impl ParagraphPair {
    pub fn new<C, P>(chars: C, pinyins: P) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            chars: chars.into_iter().map(Into::into).collect(),
            pinyins: pinyins.into_iter().map(Into::into).collect(),
        }
    }

    /// True when both sides have the same number of positions.
    pub fn is_aligned(&self) -> bool {
        self.chars.len() == self.pinyins.len()
    }

    /// Number of character positions, start marker included.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// One training example: preceding characters, the pinyin typed for a
/// window, and the characters that window should produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Triple {
    pub context: Vec<String>,
    pub pinyin: Vec<String>,
    pub target: Vec<String>,
}

impl Triple {
    pub fn new(context: &[String], pinyin: Vec<String>, target: &[String]) -> Self {
        Self {
            context: context.to_vec(),
            pinyin,
            target: target.to_vec(),
        }
    }
}
