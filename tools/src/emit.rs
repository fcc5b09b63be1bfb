//! Writing extracted triples as train/dev/test source and target files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use datagen_core::Triple;
use tracing::info;

pub const SPLITS: [&str; 3] = ["train", "dev", "test"];

/// Sizes of the 70/10/20 split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSizes {
    pub train: usize,
    pub dev: usize,
    pub test: usize,
}

pub fn split_sizes(n: usize) -> SplitSizes {
    let train = n * 7 / 10;
    let dev = n / 10;
    SplitSizes {
        train,
        dev,
        test: n - train - dev,
    }
}

/// `context | p i n y i n`: context characters, then every pinyin letter
/// separated by a space.
pub fn source_line(triple: &Triple) -> String {
    let letters: Vec<String> = triple.pinyin.concat().chars().map(String::from).collect();
    format!("{} | {}", triple.context.join(" "), letters.join(" "))
}

pub fn target_line(triple: &Triple) -> String {
    triple.target.join(" ")
}

/// Write `out_dir/{train,dev,test}/{name}.source` and `.target`, creating
/// the split directories as needed.
pub fn write_splits(triples: &[Triple], out_dir: &Path, name: &str) -> Result<SplitSizes> {
    let sizes = split_sizes(triples.len());
    let bounds = [
        (0, sizes.train),
        (sizes.train, sizes.train + sizes.dev),
        (sizes.train + sizes.dev, triples.len()),
    ];

    for (split, (start, end)) in SPLITS.iter().zip(bounds) {
        let dir = out_dir.join(split);
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        let mut source = create(&dir.join(format!("{name}.source")))?;
        let mut target = create(&dir.join(format!("{name}.target")))?;
        for triple in &triples[start..end] {
            writeln!(source, "{}", source_line(triple))?;
            writeln!(target, "{}", target_line(triple))?;
        }
        source.flush()?;
        target.flush()?;
    }

    info!(train = sizes.train, dev = sizes.dev, test = sizes.test, "wrote splits");
    Ok(sizes)
}

/// Pretty JSON of the first `n` triples, for eyeballing.
pub fn write_sample_json(triples: &[Triple], path: &Path, n: usize) -> Result<()> {
    let sample = &triples[..n.min(triples.len())];
    let mut out = create(path)?;
    serde_json::to_writer_pretty(&mut out, sample).with_context(|| format!("write {}", path.display()))?;
    out.flush()?;
    Ok(())
}

/// Full triple dump in bincode.
pub fn write_bincode(triples: &[Triple], path: &Path) -> Result<()> {
    let mut out = create(path)?;
    bincode::serialize_into(&mut out, triples).with_context(|| format!("write {}", path.display()))?;
    out.flush()?;
    Ok(())
}

pub fn read_bincode(path: &Path) -> Result<Vec<Triple>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let triples = bincode::deserialize_from(BufReader::new(file))
        .with_context(|| format!("read {}", path.display()))?;
    Ok(triples)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    Ok(BufWriter::new(file))
}
