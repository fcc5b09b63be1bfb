// libpinyin/src/parser.rs
//
// Pinyin parser for syllable segmentation.
// - Trie of full syllables and bare initials (incomplete syllables)
// - DP over (position, token count) so a caller-supplied count hint can
//   break ties between equally cheap readings
// - Apostrophe is an enforced boundary and never becomes a token

use datagen_core::{Segmenter, TrieNode};
use once_cell::sync::Lazy;
use tracing::trace;

use crate::syllables::{PINYIN_INITIALS, PINYIN_SYLLABLES};

/// Cost of a complete syllable ("hao").
const FULL_COST: u32 = 10;
/// Cost of a bare initial ("h"); slightly worse than a complete syllable.
const INCOMPLETE_COST: u32 = 15;
/// Cost of a character no entry covers.
const UNKNOWN_COST: u32 = 100;

const SEPARATOR: char = '\'';

/// How a token was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyllableKind {
    /// A complete syllable from the inventory.
    Full,
    /// An initial standing in for a syllable.
    Incomplete,
    /// A single character nothing matched.
    Unknown,
}

impl SyllableKind {
    fn cost(self) -> u32 {
        match self {
            SyllableKind::Full => FULL_COST,
            SyllableKind::Incomplete => INCOMPLETE_COST,
            SyllableKind::Unknown => UNKNOWN_COST,
        }
    }
}

/// A single segmented token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syllable {
    pub text: String,
    pub kind: SyllableKind,
}

impl Syllable {
    pub fn new<T: Into<String>>(text: T, kind: SyllableKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Best way to segment the suffix starting at some position with a fixed
/// number of tokens.
#[derive(Debug, Clone, Copy)]
struct Step {
    cost: u32,
    next: usize,
    /// `None` for a skipped separator.
    kind: Option<SyllableKind>,
}

/// Trie-backed pinyin segmenter.
///
/// Public entrypoints:
/// - `Parser::standard` for the full inventory plus bare initials
/// - `Parser::with_syllables` for a custom inventory
/// - `Parser::segment_with_hint` / `Parser::segment_best`
#[derive(Debug, Clone, Default)]
pub struct Parser {
    trie: TrieNode<SyllableKind>,
}

static STANDARD: Lazy<Parser> = Lazy::new(Parser::standard);

impl Parser {
    /// Create an empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Full syllable inventory plus the 23 initials as incomplete syllables.
    pub fn standard() -> Self {
        let mut p = Parser::with_syllables(PINYIN_SYLLABLES);
        for initial in PINYIN_INITIALS {
            p.insert_incomplete(initial);
        }
        p
    }

    /// Shared instance of [`Parser::standard`].
    pub fn shared() -> &'static Parser {
        &STANDARD
    }

    /// Create a parser holding only the given complete syllables.
    pub fn with_syllables<T: AsRef<str>>(syllables: &[T]) -> Self {
        let mut p = Parser::new();
        for s in syllables {
            p.insert_syllable(s.as_ref());
        }
        p
    }

    /// Insert a complete syllable (lower-cased and trimmed).
    pub fn insert_syllable(&mut self, syllable: &str) {
        let key = syllable.trim().to_ascii_lowercase();
        if !key.is_empty() {
            self.trie.insert(&key, SyllableKind::Full);
        }
    }

    /// Insert an incomplete syllable. Never downgrades an existing complete one.
    pub fn insert_incomplete(&mut self, initial: &str) {
        let key = initial.trim().to_ascii_lowercase();
        if !key.is_empty() && !self.trie.contains_key(&key) {
            self.trie.insert(&key, SyllableKind::Incomplete);
        }
    }

    /// True if the parser contains `syllable` as a complete syllable.
    pub fn contains_syllable(&self, syllable: &str) -> bool {
        self.trie.get(&syllable.to_ascii_lowercase()) == Some(&SyllableKind::Full)
    }

    /// Lowest-cost segmentation, preferring fewer tokens on ties.
    pub fn segment_best(&self, input: &str) -> Vec<Syllable> {
        self.segment_inner(input, None)
    }

    /// Lowest-cost segmentation; among equally cheap readings the one whose
    /// token count is closest to `hint` wins, then the one with fewer tokens.
    ///
    /// Input is lower-cased and whitespace is dropped.
    pub fn segment_with_hint(&self, input: &str, hint: usize) -> Vec<Syllable> {
        self.segment_inner(input, Some(hint))
    }

    fn segment_inner(&self, input: &str, hint: Option<usize>) -> Vec<Syllable> {
        let normalized: Vec<char> = input
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let n = normalized.len();
        if n == 0 {
            return Vec::new();
        }

        // table[pos][k]: cheapest way to cover normalized[pos..] with exactly k tokens.
        let mut table: Vec<Vec<Option<Step>>> = vec![vec![None; n + 1]; n + 1];
        table[n][0] = Some(Step {
            cost: 0,
            next: n,
            kind: None,
        });

        for pos in (0..n).rev() {
            if normalized[pos] == SEPARATOR {
                for k in 0..=n - pos - 1 {
                    table[pos][k] = table[pos + 1][k].map(|s| Step {
                        cost: s.cost,
                        next: pos + 1,
                        kind: None,
                    });
                }
                continue;
            }

            // Unknown first so that an equally cheap real syllable replaces it.
            let mut moves: Vec<(usize, SyllableKind)> = vec![(pos + 1, SyllableKind::Unknown)];
            moves.extend(self.trie.walk_prefixes(&normalized, pos).map(|(end, kind)| (end, *kind)));

            for (end, kind) in moves {
                for k in 0..=n - end {
                    let Some(rest) = table[end][k] else { continue };
                    let cost = kind.cost() + rest.cost;
                    let slot = &mut table[pos][k + 1];
                    // `<=` lets a longer leading syllable win ties, since
                    // prefixes arrive shortest first.
                    if slot.map_or(true, |cur| cost <= cur.cost) {
                        *slot = Some(Step {
                            cost,
                            next: end,
                            kind: Some(kind),
                        });
                    }
                }
            }
        }

        let Some(mut k) = Self::pick_count(&table[0], hint) else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(k);
        let mut pos = 0;
        while pos < n {
            let Some(step) = table[pos][k] else { break };
            if let Some(kind) = step.kind {
                let text: String = normalized[pos..step.next].iter().collect();
                out.push(Syllable::new(text, kind));
                k -= 1;
            }
            pos = step.next;
        }
        trace!(input, ?hint, tokens = out.len(), "segmented");
        out
    }

    /// Choose the token count to reconstruct from the row for position 0.
    fn pick_count(row: &[Option<Step>], hint: Option<usize>) -> Option<usize> {
        row.iter()
            .enumerate()
            .filter_map(|(k, step)| step.map(|s| (k, s.cost)))
            .min_by_key(|&(k, cost)| {
                let distance = hint.map_or(0, |h| k.abs_diff(h));
                (cost, distance, k)
            })
            .map(|(k, _)| k)
    }
}

impl Segmenter for Parser {
    fn segment(&self, input: &str, hint: usize) -> Vec<String> {
        self.segment_with_hint(input, hint)
            .into_iter()
            .map(|s| s.text)
            .collect()
    }
}
