use crate::encoding::{self, LetterMask};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Position of a word in its [`Dictionary`]. Stable for the whole run.
pub type WordIndex = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    text: String,
    mask: LetterMask,
}

impl Word {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mask(&self) -> LetterMask {
        self.mask
    }
}

/// The candidate words of a search: all of the same length, none with a
/// repeated letter, addressed by [`WordIndex`] in input order.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    word_len: usize,
    words: Vec<Word>,
    masks: Vec<LetterMask>,
}

impl Dictionary {
    fn empty(word_len: usize) -> Self {
        Dictionary {
            word_len,
            ..Default::default()
        }
    }

    /// Appends `w` if it is a candidate. Returns whether it was kept.
    fn push(&mut self, w: &str) -> bool {
        match encoding::encode_candidate(w, self.word_len) {
            Some(mask) => {
                self.words.push(Word {
                    text: w.to_owned(),
                    mask,
                });
                self.masks.push(mask);
                true
            }
            None => false,
        }
    }

    /// Keeps the candidates among `words`, in order. Anything else (wrong
    /// length, repeated or non-lowercase letters) is dropped without complaint.
    pub fn from_words<I, S>(words: I, word_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::empty(word_len);
        for w in words {
            dictionary.push(w.as_ref().trim());
        }
        dictionary
    }

    /// Reads whitespace-separated words. Tokens that are not valid UTF-8 are
    /// skipped like any other non-candidate.
    pub fn read<R: BufRead>(reader: R, word_len: usize) -> Result<Self> {
        Ok(Scan::run(reader, word_len)?.dictionary)
    }

    pub fn load(path: impl AsRef<Path>, word_len: usize) -> Result<Self> {
        Ok(Self::scan_file(path.as_ref(), word_len)?.dictionary)
    }

    fn scan_file(path: &Path, word_len: usize) -> Result<Scan> {
        let file = File::open(path)
            .with_context(|| format!("failed to open dictionary {}", path.display()))?;
        Scan::run(BufReader::new(file), word_len)
            .with_context(|| format!("failed to read dictionary {}", path.display()))
    }

    /// Loads from `cache`, first creating it from `raw` if it does not exist.
    ///
    /// The cache holds the already filtered list, so later runs skip reading
    /// the full raw dictionary. A cache with anything but newline-terminated
    /// candidates in it is incomplete and gets rebuilt.
    pub fn load_cached(
        raw: impl AsRef<Path>,
        cache: impl AsRef<Path>,
        word_len: usize,
    ) -> Result<Self> {
        let cache = cache.as_ref();
        if cache.exists() {
            let scan = Self::scan_file(cache, word_len)?;
            if scan.is_clean() {
                return Ok(scan.dictionary);
            }
            warn!("word cache {} is incomplete, rebuilding", cache.display());
        }
        info!("building word cache {}", cache.display());
        let dictionary = Self::load(raw, word_len)?;
        dictionary.write_cache(cache)?;
        Ok(dictionary)
    }

    /// Writes next to `cache` first and renames into place, so the cache path
    /// never holds a partial list.
    fn write_cache(&self, cache: &Path) -> Result<()> {
        let mut tmp = cache.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let written = File::create(&tmp)
            .map_err(anyhow::Error::from)
            .and_then(|file| {
                let mut out = BufWriter::new(file);
                self.write(&mut out)?;
                out.flush()?;
                Ok(())
            })
            .and_then(|()| fs::rename(&tmp, cache).map_err(Into::into));
        if written.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        written.with_context(|| format!("failed to write cache {}", cache.display()))
    }

    /// Writes one word per line.
    pub fn write<W: Write>(&self, mut out: W) -> Result<()> {
        for w in &self.words {
            writeln!(out, "{}", w.text)?;
        }
        Ok(())
    }

    pub fn word_len(&self) -> usize {
        self.word_len
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, idx: WordIndex) -> &Word {
        &self.words[idx]
    }

    pub fn text(&self, idx: WordIndex) -> &str {
        &self.words[idx].text
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Mask table, indexed like the words.
    pub fn masks(&self) -> &[LetterMask] {
        &self.masks
    }

    pub fn indices(&self) -> std::ops::Range<WordIndex> {
        0..self.words.len()
    }
}

/// One pass over a word source, filtering as it goes.
struct Scan {
    dictionary: Dictionary,
    tokens: usize,
    newline_terminated: bool,
}

impl Scan {
    fn run<R: BufRead>(mut reader: R, word_len: usize) -> Result<Self> {
        let mut scan = Scan {
            dictionary: Dictionary::empty(word_len),
            tokens: 0,
            newline_terminated: true,
        };
        let mut repeated = 0;
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            scan.newline_terminated = line.last() == Some(&b'\n');
            for token in line
                .split(|b| b.is_ascii_whitespace())
                .filter(|t| !t.is_empty())
            {
                scan.tokens += 1;
                if let Ok(w) = std::str::from_utf8(token) {
                    if !scan.dictionary.push(w)
                        && w.len() == word_len
                        && encoding::has_duplicate_letters(w)
                    {
                        repeated += 1;
                    }
                }
            }
        }
        debug!(
            "kept {} of {} words as {}-letter candidates ({} with repeated letters)",
            scan.dictionary.len(),
            scan.tokens,
            word_len,
            repeated
        );
        Ok(scan)
    }

    /// Every token was kept and the last line is complete.
    fn is_clean(&self) -> bool {
        self.tokens == self.dictionary.len() && self.newline_terminated
    }
}
