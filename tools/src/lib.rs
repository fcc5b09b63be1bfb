//! Corpus loading and split emission around the `datagen-core` extractor.

pub mod corpus;
pub mod emit;

pub use corpus::{count_corpus_chars, load_arrow_corpus, parse_line, tokenize_pinyin, Corpus, CorpusError};
pub use emit::{read_bincode, split_sizes, write_bincode, write_sample_json, write_splits, SplitSizes};
