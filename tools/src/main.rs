// tools/src/main.rs
//
// Build pinyin-to-character training data from an aligned text corpus.
//
// Usage:
//   datagen extract --corpus data/nus_sms_chinese.txt --out-dir data --name sms
//   datagen extract --corpus data/weibo.txt --out-dir data --name weibo --first-n 1000000
//   datagen segment zhgrm --hint 3
//
// Strategy (extract):
// 1. Load `汉字 ==> pin yin` lines into aligned paragraph pairs
// 2. Count characters of every raw line into out_dir/vocab/<name>
// 3. Walk the pairs with the sliding window, adding abbreviated copies
// 4. Write train/dev/test splits, a JSON sample and a bincode dump

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use datagen_core::{
    write_counts, CharSet, CharVocabulary, CjkVocabulary, ExtractionConfig,
    TripleExtractor,
};
use datagen_tools::{count_corpus_chars, load_arrow_corpus, write_bincode, write_sample_json, write_splits};
use libpinyin::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SAMPLE_SIZE: usize = 100;

#[derive(ClapParser)]
#[command(name = "datagen", about = "Training data for pinyin transliteration")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract triples from a corpus and write the training files.
    Extract {
        #[arg(long)]
        corpus: PathBuf,

        #[arg(long, default_value = "data")]
        out_dir: PathBuf,

        #[arg(long, default_value = "corpus")]
        name: String,

        /// TOML extraction settings; flags below override it.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Recognized characters (`char<TAB>count` per line). Defaults to CJK ideographs.
        #[arg(long)]
        vocab: Option<PathBuf>,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        first_n: Option<usize>,

        #[arg(long)]
        min_paragraph_len: Option<usize>,

        /// Only read this many corpus lines (debugging).
        #[arg(long)]
        limit_lines: Option<usize>,
    },
    /// Segment a pinyin string with the standard parser.
    Segment {
        input: String,

        #[arg(long, default_value_t = 0)]
        hint: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Args::parse().command {
        Command::Extract {
            corpus,
            out_dir,
            name,
            config,
            vocab,
            seed,
            first_n,
            min_paragraph_len,
            limit_lines,
        } => {
            let mut cfg = match &config {
                Some(path) => ExtractionConfig::load_toml(path)
                    .with_context(|| format!("load config {}", path.display()))?,
                None => ExtractionConfig::default(),
            };
            if seed.is_some() {
                cfg.seed = seed;
            }
            if first_n.is_some() {
                cfg.first_n = first_n;
            }
            if let Some(len) = min_paragraph_len {
                cfg.min_paragraph_len = len;
            }
            run_extract(&corpus, &out_dir, &name, cfg, vocab.as_deref(), limit_lines)
        }
        Command::Segment { input, hint } => {
            let tokens = Parser::shared().segment_with_hint(&input, hint);
            for t in tokens {
                println!("{}\t{:?}", t.text, t.kind);
            }
            Ok(())
        }
    }
}

fn run_extract(
    corpus_path: &Path,
    out_dir: &Path,
    name: &str,
    cfg: ExtractionConfig,
    vocab_path: Option<&Path>,
    limit_lines: Option<usize>,
) -> Result<()> {
    let corpus = load_arrow_corpus(corpus_path, limit_lines)?;

    let vocab_dir = out_dir.join("vocab");
    std::fs::create_dir_all(&vocab_dir).with_context(|| format!("create {}", vocab_dir.display()))?;
    let counts = count_corpus_chars(corpus_path)?;
    let vocab_out = vocab_dir.join(name);
    write_counts(&counts, &vocab_out).with_context(|| format!("write {}", vocab_out.display()))?;
    info!(distinct = counts.len(), path = %vocab_out.display(), "wrote vocabulary counts");

    let vocab: Box<dyn CharVocabulary> = match vocab_path {
        Some(path) => Box::new(
            CharSet::load(path).with_context(|| format!("load vocabulary {}", path.display()))?,
        ),
        None => Box::new(CjkVocabulary),
    };

    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let parser = Parser::standard();
    let extractor = TripleExtractor::new(cfg, &parser, &*vocab)?;
    info!(config = ?extractor.config(), "extracting");
    let triples: Vec<_> = extractor.extract(&corpus.pairs, &mut rng).collect();
    info!(triples = triples.len(), "extraction done");

    write_splits(&triples, out_dir, name)?;
    write_sample_json(&triples, &out_dir.join(format!("{name}.sample.json")), SAMPLE_SIZE)?;
    write_bincode(&triples, &out_dir.join(format!("{name}.data")))?;
    Ok(())
}
