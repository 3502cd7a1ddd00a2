//! Finds every set of `N` words, drawn from a dictionary of `L`-letter words,
//! in which no two words share a letter. The classic instance is five
//! five-letter English words that use 25 distinct letters between them.
//!
//! Words become 26-bit letter masks ([`encoding`]). Each word gets the list of
//! later words it is disjoint from ([`AdjacencyIndex`]), and a backtracking
//! search ([`CliqueSearch`]) grows tuples along those lists in ascending
//! index order, so each unordered tuple is found exactly once. The
//! [`SearchDriver`] runs one branch per starting word, in parallel with rayon,
//! and streams tuples into a [`SolutionSink`].

pub mod adjacency;
pub mod dictionary;
pub mod driver;
pub mod encoding;
pub mod search;
pub mod sink;

pub use adjacency::AdjacencyIndex;
pub use dictionary::{Dictionary, Word, WordIndex};
pub use driver::{DriverOptions, SearchDriver, SearchSummary};
pub use encoding::{encode, encode_candidate, LetterMask, ALPHABET_SIZE};
pub use search::{CliqueSearch, PartialClique, Solution};
pub use sink::{LineSink, MemorySink, SolutionSink};
