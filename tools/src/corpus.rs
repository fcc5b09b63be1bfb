//! Loading aligned paragraphs from `汉字 ==> pin yin` text corpora.
//!
//! Each line holds the characters of one paragraph, the ` ==> ` separator and
//! the space-separated pinyin reading. Both sides get the start marker, and
//! every non-letter on the pinyin side becomes its own token so punctuation
//! lines up with the character side.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use datagen_core::{count_chars, ParagraphPair, START_MARKER};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;

pub const SEPARATOR: &str = " ==> ";

static TONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z]+)[0-9]").expect("valid tone regex"));
static NON_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^a-z ])").expect("valid padding regex"));

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Summary of a corpus load.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub pairs: Vec<ParagraphPair>,
    pub duplicates: usize,
    pub malformed: usize,
}

/// Tokenize the pinyin side of a line: strip tone digits, map `uu` to `v`,
/// split punctuation off and split on whitespace.
pub fn tokenize_pinyin(pinyin: &str) -> Vec<String> {
    let lowered = pinyin.to_lowercase();
    let toneless = TONE.replace_all(&lowered, "$1 ");
    let toneless = toneless.replace("uu", "v");
    let padded = NON_LETTER.replace_all(&toneless, " $1 ");
    padded.split_whitespace().map(String::from).collect()
}

/// Parse one corpus line. Returns `None` when the separator is missing.
///
/// The pair is not checked for alignment; the extractor skips misaligned
/// pairs itself.
pub fn parse_line(line: &str) -> Option<ParagraphPair> {
    let (hanzi, pinyin) = line.split_once(SEPARATOR)?;
    let mut chars = vec![START_MARKER.to_string()];
    chars.extend(hanzi.chars().map(|c| c.to_string()));
    let mut pinyins = vec![START_MARKER.to_string()];
    pinyins.extend(tokenize_pinyin(pinyin));
    Some(ParagraphPair { chars, pinyins })
}

/// Load a corpus file, keeping at most `limit` lines when given.
///
/// Lines are trimmed, NFC-normalized and deduplicated (first occurrence
/// wins). Lines without the separator are counted and skipped.
pub fn load_arrow_corpus<P: AsRef<Path>>(path: P, limit: Option<usize>) -> Result<Corpus, CorpusError> {
    let path = path.as_ref();
    let io_err = |source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_err)?);

    let mut corpus = Corpus::default();
    let mut seen = HashSet::new();
    for (line_no, line) in reader.lines().enumerate() {
        if limit.is_some_and(|n| line_no >= n) {
            break;
        }
        let line: String = line.map_err(io_err)?.nfc().collect::<String>().trim().to_string();
        if line.is_empty() {
            continue;
        }
        if !seen.insert(line.clone()) {
            corpus.duplicates += 1;
            continue;
        }
        match parse_line(&line) {
            Some(pair) => corpus.pairs.push(pair),
            None => {
                debug!(line_no = line_no + 1, "line without separator");
                corpus.malformed += 1;
            }
        }
    }

    if corpus.malformed > 0 {
        warn!(path = %path.display(), malformed = corpus.malformed, "skipped malformed lines");
    }
    info!(
        path = %path.display(),
        pairs = corpus.pairs.len(),
        duplicates = corpus.duplicates,
        "loaded corpus"
    );
    Ok(corpus)
}

/// Character frequencies over every line of the file, duplicates and
/// malformed lines included.
pub fn count_corpus_chars<P: AsRef<Path>>(path: P) -> Result<BTreeMap<char, u64>, CorpusError> {
    let path = path.as_ref();
    let io_err = |source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_err)?);
    let lines = reader.lines().collect::<Result<Vec<_>, _>>().map_err(io_err)?;
    Ok(count_chars(&lines))
}
