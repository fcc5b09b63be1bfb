//! Sliding-window triple extraction.
//!
//! For every valid paragraph pair a cursor walks positions `1..len` (position
//! 0 holds the start marker) and, for each cursor, windows of length
//! `1..=max_input_window` are grown until the end of the paragraph or the
//! first unrecognized character. Each window yields a clean triple and, with
//! probability `noise_pair_probability`, an abbreviated copy of it.
//!
//! Extraction is lazy: [`Triples`] produces one triple per `next()` call, so
//! a consumer can stop early without paying for the rest of the corpus.

use std::borrow::Borrow;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::ExtractionConfig;
use crate::error::ConfigError;
use crate::noise::AbbreviationNoise;
use crate::segmenter::Segmenter;
use crate::triple::{ParagraphPair, Triple};
use crate::vocab::CharVocabulary;

/// Validated settings bundled with the segmentation and vocabulary capabilities.
pub struct TripleExtractor<'a, S: ?Sized, V: ?Sized> {
    config: ExtractionConfig,
    noise: AbbreviationNoise,
    segmenter: &'a S,
    vocab: &'a V,
}

impl<'a, S, V> TripleExtractor<'a, S, V>
where
    S: Segmenter + ?Sized,
    V: CharVocabulary + ?Sized,
{
    /// Fails on an unusable configuration; nothing is extracted in that case.
    pub fn new(config: ExtractionConfig, segmenter: &'a S, vocab: &'a V) -> Result<Self, ConfigError> {
        config.validate()?;
        let noise = AbbreviationNoise::new(config.noise_token_probability)?;
        Ok(Self {
            config,
            noise,
            segmenter,
            vocab,
        })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Lazily extract triples from `pairs`, drawing randomness from `rng`.
    pub fn extract<'e, I, R>(&'e self, pairs: I, rng: &'e mut R) -> Triples<'e, I::IntoIter, S, V, R>
    where
        I: IntoIterator,
        I::Item: Borrow<ParagraphPair>,
        R: Rng + ?Sized,
    {
        Triples {
            extractor: self,
            pairs: pairs.into_iter().enumerate(),
            current: None,
            window: Window::default(),
            pending: None,
            budget: self.config.first_n,
            rng,
            stats: ExtractionStats::default(),
            reported: false,
        }
    }
}

/// Counters kept while extracting, reported once the source is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub pairs_used: usize,
    pub pairs_misaligned: usize,
    pub pairs_too_short: usize,
    pub clean: usize,
    pub noisy: usize,
    pub noise_rejected: usize,
}

/// Position of the next candidate window: `chars[cursor..end]`.
#[derive(Debug, Clone, Copy)]
struct Window {
    cursor: usize,
    end: usize,
}

impl Default for Window {
    fn default() -> Self {
        Self { cursor: 1, end: 2 }
    }
}

impl Window {
    fn next_cursor(&mut self) {
        self.cursor += 1;
        self.end = self.cursor + 1;
    }
}

/// Iterator over extracted triples. See [`TripleExtractor::extract`].
pub struct Triples<'e, I, S: ?Sized, V: ?Sized, R: ?Sized>
where
    I: Iterator,
{
    extractor: &'e TripleExtractor<'e, S, V>,
    pairs: std::iter::Enumerate<I>,
    current: Option<I::Item>,
    window: Window,
    pending: Option<Triple>,
    budget: Option<usize>,
    rng: &'e mut R,
    stats: ExtractionStats,
    reported: bool,
}

impl<'e, I, S, V, R> Triples<'e, I, S, V, R>
where
    I: Iterator,
    I::Item: Borrow<ParagraphPair>,
    S: Segmenter + ?Sized,
    V: CharVocabulary + ?Sized,
    R: Rng + ?Sized,
{
    pub fn stats(&self) -> ExtractionStats {
        self.stats
    }

    /// Advance to the next pair that is aligned and long enough.
    fn next_pair(&mut self) -> Option<I::Item> {
        let min_len = self.extractor.config.min_paragraph_len;
        for (index, item) in self.pairs.by_ref() {
            let pair = <I::Item as Borrow<ParagraphPair>>::borrow(&item);
            if !pair.is_aligned() {
                warn!(
                    index,
                    chars = pair.chars.len(),
                    pinyins = pair.pinyins.len(),
                    "skipping misaligned paragraph pair"
                );
                self.stats.pairs_misaligned += 1;
                continue;
            }
            if pair.len() < min_len {
                debug!(index, len = pair.len(), min_len, "skipping short paragraph");
                self.stats.pairs_too_short += 1;
                continue;
            }
            self.stats.pairs_used += 1;
            return Some(item);
        }
        None
    }

    /// Next clean triple in walk order, or `None` once every pair is done.
    fn next_clean(&mut self) -> Option<Triple> {
        let max_window = self.extractor.config.max_input_window;
        let context_window = self.extractor.config.context_window;
        loop {
            if self.current.is_none() {
                self.current = Some(self.next_pair()?);
                self.window = Window::default();
            }
            let Self {
                current,
                window,
                extractor,
                ..
            } = self;
            let pair: &ParagraphPair = match current.as_ref() {
                Some(item) => <I::Item as Borrow<ParagraphPair>>::borrow(item),
                None => continue,
            };

            let len = pair.len();
            if window.cursor >= len {
                *current = None;
                continue;
            }
            let limit = window.cursor.saturating_add(max_window).min(len);
            if window.end > limit {
                window.next_cursor();
                continue;
            }
            // Shorter windows at this cursor already passed, so only the
            // newly added position needs checking.
            if !extractor.vocab.contains(&pair.chars[window.end - 1]) {
                window.next_cursor();
                continue;
            }

            let (cursor, end) = (window.cursor, window.end);
            window.end += 1;
            let target = &pair.chars[cursor..end];
            if target.is_empty() {
                continue;
            }
            let context = &pair.chars[cursor.saturating_sub(context_window)..cursor];
            return Some(Triple::new(context, pair.pinyins[cursor..end].to_vec(), target));
        }
    }

    fn spend(&mut self) {
        if let Some(budget) = self.budget.as_mut() {
            *budget = budget.saturating_sub(1);
        }
    }

    fn exhausted(&self) -> bool {
        self.budget == Some(0)
    }

    /// Log the summary the first time the iterator runs dry.
    fn report(&mut self) {
        if std::mem::replace(&mut self.reported, true) {
            return;
        }
        info!(
            pairs = self.stats.pairs_used,
            misaligned = self.stats.pairs_misaligned,
            too_short = self.stats.pairs_too_short,
            clean = self.stats.clean,
            noisy = self.stats.noisy,
            rejected = self.stats.noise_rejected,
            capped = self.exhausted(),
            "extraction finished"
        );
    }
}

impl<'e, I, S, V, R> Iterator for Triples<'e, I, S, V, R>
where
    I: Iterator,
    I::Item: Borrow<ParagraphPair>,
    S: Segmenter + ?Sized,
    V: CharVocabulary + ?Sized,
    R: Rng + ?Sized,
{
    type Item = Triple;

    fn next(&mut self) -> Option<Triple> {
        if self.exhausted() {
            self.report();
            return None;
        }
        if let Some(noisy) = self.pending.take() {
            self.spend();
            self.stats.noisy += 1;
            return Some(noisy);
        }

        let Some(triple) = self.next_clean() else {
            self.report();
            return None;
        };
        self.spend();
        self.stats.clean += 1;

        if !self.exhausted() && self.rng.gen_bool(self.extractor.config.noise_pair_probability) {
            match self
                .extractor
                .noise
                .generate(&triple.pinyin, self.extractor.segmenter, &mut *self.rng)
            {
                Some(pinyin) => {
                    self.pending = Some(Triple {
                        pinyin,
                        ..triple.clone()
                    })
                }
                None => self.stats.noise_rejected += 1,
            }
        }
        Some(triple)
    }
}

/// Eagerly extract every triple from `pairs`.
///
/// Convenience wrapper over [`TripleExtractor`]; fails only when `config` is
/// invalid.
pub fn extract_triples<I, S, V, R>(
    pairs: I,
    config: &ExtractionConfig,
    segmenter: &S,
    vocab: &V,
    rng: &mut R,
) -> Result<Vec<Triple>, ConfigError>
where
    I: IntoIterator,
    I::Item: Borrow<ParagraphPair>,
    S: Segmenter + ?Sized,
    V: CharVocabulary + ?Sized,
    R: Rng + ?Sized,
{
    let extractor = TripleExtractor::new(config.clone(), segmenter, vocab)?;
    let triples: Vec<Triple> = extractor.extract(pairs, rng).collect();
    Ok(triples)
}
