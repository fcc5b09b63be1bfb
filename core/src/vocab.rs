//! Recognized-character sets and character frequency counting.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use ahash::AHashSet;
use tracing::debug;

/// Gate for window growth: a window may only cover recognized characters.
pub trait CharVocabulary {
    fn contains(&self, ch: &str) -> bool;
}

impl<V: CharVocabulary + ?Sized> CharVocabulary for &V {
    fn contains(&self, ch: &str) -> bool {
        (**self).contains(ch)
    }
}

/// Explicit set of recognized characters.
#[derive(Debug, Clone, Default)]
pub struct CharSet {
    chars: AHashSet<String>,
}

impl CharSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from anything yielding characters or strings.
    pub fn from_chars<I, T>(chars: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            chars: chars.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert<T: Into<String>>(&mut self, ch: T) {
        self.chars.insert(ch.into());
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Load a vocabulary file. Each line is either `char<TAB>count` (the
    /// format written by [`write_counts`]) or a bare character; blank lines
    /// are ignored.
    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let mut set = Self::new();
        for line in reader.lines() {
            let line = line?;
            let entry = line.split('\t').next().unwrap_or("").trim();
            if !entry.is_empty() {
                set.insert(entry);
            }
        }
        debug!(path = %path.display(), chars = set.len(), "loaded vocabulary");
        Ok(set)
    }
}

impl CharVocabulary for CharSet {
    fn contains(&self, ch: &str) -> bool {
        self.chars.contains(ch)
    }
}

/// Accepts any single Han character: the CJK Unified Ideographs blocks with
/// extensions A through H, both compatibility blocks and the ideographic
/// zero `〇`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CjkVocabulary;

impl CjkVocabulary {
    pub fn is_cjk(ch: char) -> bool {
        matches!(ch,
            '\u{3007}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{2A6DF}'
            | '\u{2A700}'..='\u{2EBEF}'
            | '\u{2F800}'..='\u{2FA1F}'
            | '\u{30000}'..='\u{323AF}')
    }
}

impl CharVocabulary for CjkVocabulary {
    fn contains(&self, ch: &str) -> bool {
        let mut it = ch.chars();
        match (it.next(), it.next()) {
            (Some(c), None) => Self::is_cjk(c),
            _ => false,
        }
    }
}

/// Count every character across `lines` (surrounding whitespace trimmed).
pub fn count_chars<I, S>(lines: I) -> BTreeMap<char, u64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = BTreeMap::new();
    for line in lines {
        for ch in line.as_ref().trim().chars() {
            *counts.entry(ch).or_insert(0) += 1;
        }
    }
    counts
}

/// Write counts as sorted `char<TAB>count` lines.
pub fn write_counts<P: AsRef<Path>>(counts: &BTreeMap<char, u64>, path: P) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (ch, n) in counts {
        writeln!(out, "{}\t{}", ch, n)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cjk_accepts_hanzi_only() {
        let v = CjkVocabulary;
        assert!(v.contains("你"));
        assert!(v.contains("好"));
        assert!(!v.contains("^"));
        assert!(!v.contains("，"));
        assert!(!v.contains("a"));
    }

    #[test]
    fn cjk_covers_extensions_and_ideographic_zero() {
        let v = CjkVocabulary;
        assert!(v.contains("〇"));
        assert!(v.contains("\u{2A700}"));
        assert!(v.contains("\u{2B820}"));
        assert!(v.contains("\u{2CEB0}"));
        assert!(v.contains("\u{30000}"));
        assert!(!v.contains("\u{3006}"));
        assert!(!v.contains("\u{2A6E0}"));
        assert!(!v.contains("你好"));
        assert!(!v.contains(""));
    }

    #[test]
    fn char_set_membership() {
        let set = CharSet::from_chars(["你", "好"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("你"));
        assert!(!set.contains("们"));
    }

    #[test]
    fn counts_are_sorted_and_reloadable() {
        let counts = count_chars(["你好 ", "你们"]);
        assert_eq!(counts.get(&'你'), Some(&2));
        assert_eq!(counts.get(&'好'), Some(&1));
        assert_eq!(counts.get(&' '), None);

        let path = std::env::temp_dir().join(format!(
            "datagen_vocab_test_{}.txt",
            std::process::id()
        ));
        write_counts(&counts, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let first = text.lines().next().unwrap();
        assert_eq!(first, format!("{}\t{}", counts.keys().next().unwrap(), counts.values().next().unwrap()));

        let set = CharSet::load(&path).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("们"));
        let _ = std::fs::remove_file(&path);
    }
}
