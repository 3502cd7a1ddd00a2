use anyhow::{Context, Result};
use clap::Parser;
use disjoint_words::{Dictionary, DriverOptions, LineSink, SearchDriver};
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

const WORD_LEN: usize = 5;
const CLIQUE_SIZE: usize = 5;

/// Find sets of five-letter words that share no letters.
#[derive(Parser)]
struct Options {
    /// Dictionary, whitespace separated.
    #[clap(default_value = "words_alpha.txt")]
    words: PathBuf,

    /// Filtered word list reused by later runs.
    #[clap(long, default_value = "words_beta.txt")]
    cache: PathBuf,

    /// Read the dictionary directly, without creating or using the cache.
    #[clap(long)]
    no_cache: bool,

    /// One solution per line.
    #[clap(short, long, default_value = "words_out.txt")]
    output: PathBuf,

    /// Search on the current thread only.
    #[clap(long)]
    sequential: bool,

    /// Draw a progress bar on stderr.
    #[clap(long)]
    progress: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opt = Options::parse();

    let dictionary = if opt.no_cache {
        Dictionary::load(&opt.words, WORD_LEN)?
    } else {
        Dictionary::load_cached(&opt.words, &opt.cache, WORD_LEN)?
    };
    info!("{} candidate words", dictionary.len());

    let out = File::create(&opt.output)
        .with_context(|| format!("failed to create {}", opt.output.display()))?;
    let sink = LineSink::new(BufWriter::new(out));

    let driver = SearchDriver::new(DriverOptions {
        parallel: !opt.sequential,
        progress: opt.progress,
    });
    let summary = driver.solve::<CLIQUE_SIZE>(&dictionary, &sink)?;
    info!(
        "wrote {} solutions to {}",
        summary.solutions,
        opt.output.display()
    );
    Ok(())
}
