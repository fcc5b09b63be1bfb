//! libpinyin crate root
//!
//! Pinyin segmentation for validating abbreviated input. The `Parser` here
//! implements `datagen_core::Segmenter`, so it can be handed straight to the
//! triple extractor.
//!
//! Public API exported here:
//! - `Parser`, `Syllable` and `SyllableKind` from `parser`
//! - `PINYIN_SYLLABLES` and `PINYIN_INITIALS` from `syllables`

pub mod parser;
pub mod syllables;

pub use parser::{Parser, Syllable, SyllableKind};
pub use syllables::{PINYIN_INITIALS, PINYIN_SYLLABLES};
