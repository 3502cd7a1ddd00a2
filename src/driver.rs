use crate::adjacency::AdjacencyIndex;
use crate::dictionary::{Dictionary, WordIndex};
use crate::search::CliqueSearch;
use crate::sink::SolutionSink;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriverOptions {
    /// Run branches on the rayon pool instead of one after another.
    pub parallel: bool,
    /// Draw a progress bar on stderr, advanced once per finished branch.
    pub progress: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        DriverOptions {
            parallel: true,
            progress: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchSummary {
    pub words: usize,
    pub edges: usize,
    pub solutions: usize,
    pub elapsed: Duration,
}

/// Runs one search branch per starting word and streams every tuple to a sink.
#[derive(Clone, Debug, Default)]
pub struct SearchDriver {
    options: DriverOptions,
}

impl SearchDriver {
    pub fn new(options: DriverOptions) -> Self {
        SearchDriver { options }
    }

    pub fn options(&self) -> DriverOptions {
        self.options
    }

    /// Builds the adjacency index for `dictionary` and runs the search.
    pub fn solve<const N: usize>(
        &self,
        dictionary: &Dictionary,
        sink: &dyn SolutionSink,
    ) -> Result<SearchSummary> {
        info!("building adjacency list for {} words", dictionary.len());
        let adjacency = AdjacencyIndex::build(dictionary.masks());
        info!("{} disjoint pairs", adjacency.edge_count());
        self.run::<N>(dictionary, &adjacency, sink)
    }

    /// Searches every branch to exhaustion.
    ///
    /// Branches share only `dictionary` and `adjacency`, both read-only. Tuples
    /// from different branches reach `sink` in no particular order. The first
    /// failed write stops the run and is returned; nothing is dropped quietly.
    pub fn run<const N: usize>(
        &self,
        dictionary: &Dictionary,
        adjacency: &AdjacencyIndex,
        sink: &dyn SolutionSink,
    ) -> Result<SearchSummary> {
        let started = Instant::now();
        let search = CliqueSearch::<N>::new(dictionary.masks(), adjacency);
        let progress = self.progress_bar(dictionary.len())?;
        let found = AtomicUsize::new(0);

        info!("building {}-word cliques", N);
        let branch = |start: WordIndex| -> Result<()> {
            let mut local = 0usize;
            search.search(start, |solution| -> Result<()> {
                let words = solution.texts(dictionary);
                sink.emit(&words)
                    .with_context(|| format!("failed to record solution: {}", words.join(" ")))?;
                local += 1;
                Ok(())
            })?;
            if local > 0 {
                debug!("{} solutions from {}", local, dictionary.text(start));
            }
            found.fetch_add(local, Ordering::Relaxed);
            progress.inc(1);
            Ok(())
        };

        let searched = if self.options.parallel {
            dictionary.indices().into_par_iter().try_for_each(branch)
        } else {
            dictionary.indices().try_for_each(branch)
        };
        progress.finish_and_clear();
        searched?;
        sink.finish().context("failed to flush solutions")?;

        let summary = SearchSummary {
            words: dictionary.len(),
            edges: adjacency.edge_count(),
            solutions: found.into_inner(),
            elapsed: started.elapsed(),
        };
        info!(
            "found {} solutions in {:.2?}",
            summary.solutions, summary.elapsed
        );
        Ok(summary)
    }

    fn progress_bar(&self, branches: usize) -> Result<ProgressBar> {
        if !self.options.progress {
            return Ok(ProgressBar::hidden());
        }
        let bar = ProgressBar::new(branches as u64);
        bar.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] [{bar:70}] {percent}% {pos}/{len}")?
                .progress_chars("=> "),
        );
        Ok(bar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{LineSink, MemorySink};
    use anyhow::bail;

    fn pairs(solutions: &[&[&str]]) -> Vec<Vec<String>> {
        solutions
            .iter()
            .map(|s| s.iter().map(|&w| w.to_owned()).collect())
            .collect()
    }

    #[test]
    fn small_dictionary_parallel_and_sequential() {
        let dict = Dictionary::from_words(["ab", "cd", "ef", "ac"], 2);
        let mut expected = pairs(&[&["ab", "cd"], &["ab", "ef"], &["cd", "ef"], &["ef", "ac"]]);
        expected.sort();
        for parallel in [true, false] {
            let driver = SearchDriver::new(DriverOptions {
                parallel,
                progress: false,
            });
            let sink = MemorySink::new();
            let summary = driver.solve::<2>(&dict, &sink).unwrap();
            assert_eq!(summary.words, 4);
            assert_eq!(summary.edges, 4);
            assert_eq!(summary.solutions, 4);
            assert_eq!(sink.into_sorted(), expected);
        }
    }

    #[test]
    fn sequential_output_follows_traversal_order() {
        let dict = Dictionary::from_words(["ab", "cd", "ef", "ac"], 2);
        let sink = LineSink::new(Vec::new());
        let driver = SearchDriver::new(DriverOptions {
            parallel: false,
            progress: false,
        });
        driver.solve::<2>(&dict, &sink).unwrap();
        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(out, "ab cd\nab ef\ncd ef\nef ac\n");
    }

    #[test]
    fn empty_and_single_word_dictionaries() {
        let driver = SearchDriver::default();
        for words in [vec![], vec!["ab"]] {
            let dict = Dictionary::from_words(words, 2);
            let sink = MemorySink::new();
            let summary = driver.solve::<2>(&dict, &sink).unwrap();
            assert_eq!(summary.solutions, 0);
            assert!(sink.is_empty());
        }
    }

    struct RejectingSink;

    impl SolutionSink for RejectingSink {
        fn emit(&self, _: &[&str]) -> Result<()> {
            bail!("no space left")
        }
    }

    #[test]
    fn sink_failure_is_surfaced() {
        let dict = Dictionary::from_words(["ab", "cd"], 2);
        let err = SearchDriver::default()
            .solve::<2>(&dict, &RejectingSink)
            .unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("ab cd"), "{}", msg);
        assert!(msg.contains("no space left"), "{}", msg);
    }

    #[test]
    fn progress_bar_does_not_change_results() {
        let dict = Dictionary::from_words(["abc", "def", "ghi", "adg", "beh", "cfi"], 3);
        let sink = MemorySink::new();
        let driver = SearchDriver::new(DriverOptions {
            parallel: true,
            progress: true,
        });
        let summary = driver.solve::<3>(&dict, &sink).unwrap();
        assert_eq!(summary.solutions, 2);
        assert_eq!(
            sink.into_sorted(),
            pairs(&[&["abc", "def", "ghi"], &["adg", "beh", "cfi"]])
        );
    }
}
