//! datagen-core
//!
//! Training-data preparation for pinyin-to-character transliteration models.
//! Aligned character/pinyin paragraphs are walked with a sliding window to
//! produce `(context, pinyin, target)` triples, optionally paired with an
//! abbreviated copy of the pinyin that is checked against a segmenter.
//!
//! Public API:
//! - `ParagraphPair`, `Triple` - input and output data
//! - `TripleExtractor`, `extract_triples` - the windowing walk
//! - `AbbreviationNoise`, `abbreviate` - segmentation-preserving abbreviation
//! - `Segmenter`, `CharVocabulary` - capabilities supplied by the caller
//! - `ExtractionConfig` - settings, loadable from TOML
//! - `TrieNode` - prefix trie for segmenter implementations

pub mod config;
pub use config::ExtractionConfig;

pub mod error;
pub use error::ConfigError;

pub mod triple;
pub use triple::{ParagraphPair, Triple, START_MARKER};

pub mod segmenter;
pub use segmenter::Segmenter;

pub mod vocab;
pub use vocab::{count_chars, write_counts, CharSet, CharVocabulary, CjkVocabulary};

pub mod noise;
pub use noise::{abbreviate, AbbreviationNoise};

pub mod extract;
pub use extract::{extract_triples, ExtractionStats, TripleExtractor, Triples};

pub mod trie;
pub use trie::TrieNode;
