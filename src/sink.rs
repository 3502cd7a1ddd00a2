use anyhow::{anyhow, Result};
use itertools::Itertools;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Receives finished tuples, possibly from many search threads at once.
pub trait SolutionSink: Send + Sync {
    /// Records one tuple. Each call must land as a whole, never interleaved
    /// with another.
    fn emit(&self, words: &[&str]) -> Result<()>;

    /// Called once after the last tuple.
    fn finish(&self) -> Result<()> {
        Ok(())
    }
}

/// Writes each tuple as one line of space-separated words.
pub struct LineSink<W> {
    out: Mutex<W>,
    lines: AtomicUsize,
}

impl<W: Write + Send> LineSink<W> {
    pub fn new(out: W) -> Self {
        LineSink {
            out: Mutex::new(out),
            lines: AtomicUsize::new(0),
        }
    }

    /// Lines written so far.
    pub fn lines(&self) -> usize {
        self.lines.load(Ordering::Relaxed)
    }

    pub fn into_inner(self) -> Result<W> {
        self.out
            .into_inner()
            .map_err(|_| anyhow!("output lock poisoned"))
    }
}

impl<W: Write + Send> SolutionSink for LineSink<W> {
    fn emit(&self, words: &[&str]) -> Result<()> {
        // Format outside the lock; the write itself is a single call.
        let line = format!("{}\n", words.iter().join(" "));
        let mut out = self.out.lock().map_err(|_| anyhow!("output lock poisoned"))?;
        out.write_all(line.as_bytes())?;
        self.lines.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn finish(&self) -> Result<()> {
        let mut out = self.out.lock().map_err(|_| anyhow!("output lock poisoned"))?;
        out.flush()?;
        Ok(())
    }
}

/// Keeps every tuple in memory.
#[derive(Default)]
pub struct MemorySink {
    solutions: Mutex<Vec<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        match self.solutions.lock() {
            Ok(s) => s.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tuples, each in emitted word order, sorted for comparison.
    pub fn into_sorted(self) -> Vec<Vec<String>> {
        let solutions = match self.solutions.into_inner() {
            Ok(s) => s,
            Err(poisoned) => poisoned.into_inner(),
        };
        solutions.into_iter().sorted().collect()
    }
}

impl SolutionSink for MemorySink {
    fn emit(&self, words: &[&str]) -> Result<()> {
        let solution = words.iter().map(|&w| w.to_owned()).collect();
        self.solutions
            .lock()
            .map_err(|_| anyhow!("solution store poisoned"))?
            .push(solution);
        Ok(())
    }
}
