//! Extraction scenarios using test doubles for the segmenter and vocabulary.

use std::cell::Cell;
use std::io;
use std::sync::{Arc, Mutex};

use datagen_core::{
    CharVocabulary, CjkVocabulary, ExtractionConfig, ParagraphPair, Segmenter, Triple,
    TripleExtractor,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Rejects every abbreviation by reporting one token too few for the noisy
/// string, and counts how often it was asked.
struct Rejecting {
    calls: Cell<usize>,
}

impl Segmenter for Rejecting {
    fn segment(&self, input: &str, hint: usize) -> Vec<String> {
        self.calls.set(self.calls.get() + 1);
        let n = if input.chars().count() <= hint { hint - 1 } else { hint };
        vec![String::new(); n]
    }
}

struct Agreeable;

impl Segmenter for Agreeable {
    fn segment(&self, _input: &str, hint: usize) -> Vec<String> {
        vec![String::new(); hint]
    }
}

/// Treats everything except ASCII punctuation and the start marker as known.
struct NoPunctuation;

impl CharVocabulary for NoPunctuation {
    fn contains(&self, ch: &str) -> bool {
        !ch.chars().all(|c| c.is_ascii_punctuation())
    }
}

fn pair(chars: &str, pinyin: &str) -> ParagraphPair {
    let mut c: Vec<String> = vec!["^".into()];
    c.extend(chars.chars().map(|ch| ch.to_string()));
    let mut p: Vec<String> = vec!["^".into()];
    p.extend(pinyin.split_whitespace().map(String::from));
    ParagraphPair { chars: c, pinyins: p }
}

fn config() -> ExtractionConfig {
    ExtractionConfig {
        context_window: 3,
        max_input_window: 3,
        min_paragraph_len: 3,
        noise_pair_probability: 0.0,
        ..Default::default()
    }
}

#[test]
fn window_counts_per_cursor() {
    // len 5 (four characters): cursors 1..=4 give 3 + 3 + 2 + 1 windows
    let pairs = vec![pair("中华人民", "zhong hua ren min")];
    let extractor = TripleExtractor::new(config(), &Agreeable, &CjkVocabulary).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let out: Vec<Triple> = extractor.extract(&pairs, &mut rng).collect();
    assert_eq!(out.len(), 9);
    let lengths: Vec<usize> = out.iter().map(|t| t.target.len()).collect();
    assert_eq!(lengths, vec![1, 2, 3, 1, 2, 3, 1, 2, 1]);
    assert_eq!(out[8].context, vec!["中", "华", "人"]);
    assert_eq!(out[8].target, vec!["民"]);
}

#[test]
fn lazy_consumption_stops_early() {
    let pairs: Vec<ParagraphPair> = (0..1000).map(|_| pair("中华人民", "zhong hua ren min")).collect();
    let extractor = TripleExtractor::new(config(), &Agreeable, &CjkVocabulary).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let mut iter = extractor.extract(pairs.iter(), &mut rng);
    let first: Vec<Triple> = iter.by_ref().take(5).collect();
    assert_eq!(first.len(), 5);
    assert_eq!(iter.stats().pairs_used, 1);
}

#[test]
fn rejected_noise_leaves_clean_triples_only() {
    let cfg = ExtractionConfig {
        noise_pair_probability: 1.0,
        noise_token_probability: 1.0,
        ..config()
    };
    let seg = Rejecting { calls: Cell::new(0) };
    let pairs = vec![pair("你好", "ni hao")];
    let extractor = TripleExtractor::new(cfg, &seg, &CjkVocabulary).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let mut iter = extractor.extract(&pairs, &mut rng);
    let out: Vec<Triple> = iter.by_ref().collect();
    assert_eq!(out.len(), 3);
    assert_eq!(iter.stats().noise_rejected, 3);
    assert_eq!(iter.stats().noisy, 0);
    // noisy and original string per attempt
    assert_eq!(seg.calls.get(), 6);
}

#[test]
fn custom_vocabulary_gates_windows() {
    let pairs = vec![pair("ab.c", "a b . c")];
    let extractor = TripleExtractor::new(config(), &Agreeable, &NoPunctuation).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let out: Vec<Triple> = extractor.extract(&pairs, &mut rng).collect();
    let targets: Vec<String> = out.iter().map(|t| t.target.concat()).collect();
    assert_eq!(targets, vec!["a", "ab", "b", "c"]);
}

#[test]
fn owned_pairs_are_accepted() {
    let extractor = TripleExtractor::new(config(), &Agreeable, &CjkVocabulary).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let count = extractor
        .extract(vec![pair("你好", "ni hao")], &mut rng)
        .count();
    assert_eq!(count, 3);
}

/// Collects formatted log output so tests can inspect it.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn capped_run_logs_summary_once() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let cfg = ExtractionConfig {
        first_n: Some(2),
        ..config()
    };
    let pairs = vec![pair("中华人民", "zhong hua ren min")];
    tracing::subscriber::with_default(subscriber, || {
        let extractor = TripleExtractor::new(cfg, &Agreeable, &CjkVocabulary).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut iter = extractor.extract(&pairs, &mut rng);
        assert_eq!(iter.by_ref().count(), 2);
        assert!(iter.next().is_none());
        assert_eq!(extractor.config().first_n, Some(2));
    });

    let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert_eq!(text.matches("extraction finished").count(), 1);
    assert!(text.contains("clean=2"));
    assert!(text.contains("capped=true"));
}
