//! Codon-usage grammars: learning, derived tables and persistence.
//!
//! A grammar is the frequency table of codon "subroutines" (contiguous runs
//! of 2 or 3 codons) observed in a training corpus for one organism, plus
//! the set of codon-to-codon transitions seen during learning.  Grammars
//! are built once and read-only afterwards; grammars of different organisms
//! are independent and never merged.

use std::collections::BTreeSet;
use std::io::{BufReader, BufWriter};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

pub use crate::grammar::error::Error;
use crate::sequences;

mod error {
    /// Error type for grammar persistence.
    #[derive(thiserror::Error, Debug)]
    pub enum Error {
        #[error("could not open grammar file: {0}")]
        GrammarFileOpen(String),
        #[error("could not parse grammar file: {0}")]
        GrammarFileParse(String),
        #[error("could not write grammar file: {0}")]
        GrammarFileWrite(String),
    }
}

/// Codon window lengths used as grammar subroutines.
pub const WINDOW_SIZES: [usize; 2] = [2, 3];

/// Joins a codon window into its subroutine key.
pub fn subroutine_key(codons: &[String]) -> String {
    codons.join(" ")
}

/// Structural category of a codon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodonCategory {
    StartLike,
    StopLike,
    Continuation,
}

impl CodonCategory {
    /// Classifies a codon over the canonical alphabet.
    pub fn of(codon: &str) -> Self {
        if sequences::is_start_codon(codon) {
            CodonCategory::StartLike
        } else if sequences::is_stop_codon(codon) {
            CodonCategory::StopLike
        } else {
            CodonCategory::Continuation
        }
    }
}

/// Learned codon-usage grammar for one organism.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    /// Occurrence count per subroutine key, aggregated over the corpus.
    subroutines: AHashMap<String, u64>,
    /// Successor codons observed immediately after each codon.
    transitions: AHashMap<String, BTreeSet<String>>,
}

impl Grammar {
    /// Learns a grammar from a training corpus.
    ///
    /// Every contiguous window of 2 and of 3 codons (sliding by one codon)
    /// contributes one count to its subroutine key; counts aggregate over
    /// all sequences of the corpus, without deduplication.  A sequence
    /// shorter than two codons contributes nothing.
    pub fn learn<S: AsRef<str>>(corpus: &[S]) -> Self {
        let mut grammar = Grammar::default();
        for sequence in corpus {
            grammar.absorb(sequence.as_ref());
        }
        grammar
    }

    fn absorb(&mut self, sequence: &str) {
        let codons = sequences::tokenize(sequence);
        for size in WINDOW_SIZES {
            if codons.len() < size {
                continue;
            }
            for window in codons.windows(size) {
                *self.subroutines.entry(subroutine_key(window)).or_insert(0) += 1;
            }
        }
        for pair in codons.windows(2) {
            self.transitions
                .entry(pair[0].clone())
                .or_default()
                .insert(pair[1].clone());
        }
    }

    /// Whether the subroutine key was observed during learning.
    pub fn contains(&self, key: &str) -> bool {
        self.subroutines.contains_key(key)
    }

    /// Occurrence count of a subroutine key (0 if never observed).
    pub fn count(&self, key: &str) -> u64 {
        self.subroutines.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct subroutines.
    pub fn len(&self) -> usize {
        self.subroutines.len()
    }

    /// Whether any subroutine of the given codon count was observed.
    ///
    /// A grammar without vocabulary of a window length cannot judge windows
    /// of that length.
    pub fn has_subroutines_of(&self, size: usize) -> bool {
        self.subroutines
            .keys()
            .any(|key| key.split(' ').count() == size)
    }

    pub fn is_empty(&self) -> bool {
        self.subroutines.is_empty()
    }

    /// Whether `to` was ever observed immediately after `from`.
    ///
    /// A codon that never occurred in a non-final position has an empty
    /// successor set, so every transition out of it is disallowed.
    pub fn allows_transition(&self, from: &str, to: &str) -> bool {
        self.transitions
            .get(from)
            .map(|successors| successors.contains(to))
            .unwrap_or(false)
    }

    /// Derives single-codon frequencies from the subroutine counts.
    ///
    /// Each subroutine count is credited to every codon token the key
    /// contains: a 2-codon key contributes to both constituents, a 3-codon
    /// key to all three.
    pub fn codon_frequencies(&self) -> AHashMap<String, u64> {
        let mut result = AHashMap::default();
        for (key, count) in &self.subroutines {
            for codon in key.split(' ') {
                *result.entry(codon.to_string()).or_insert(0) += count;
            }
        }
        result
    }

    /// Reads a persisted grammar from a JSON file (gzip-ed if the path ends
    /// in `.gz`).
    pub fn from_json_file(path: &str) -> Result<Self, Error> {
        let file =
            std::fs::File::open(path).map_err(|_e| Error::GrammarFileOpen(path.to_string()))?;
        if path.ends_with(".gz") {
            serde_json::from_reader(flate2::bufread::GzDecoder::new(BufReader::new(file)))
                .map_err(|_e| Error::GrammarFileParse(path.to_string()))
        } else {
            serde_json::from_reader(BufReader::new(file))
                .map_err(|_e| Error::GrammarFileParse(path.to_string()))
        }
    }

    /// Writes the grammar to a JSON file (gzip-ed if the path ends in `.gz`).
    pub fn to_json_file(&self, path: &str) -> Result<(), Error> {
        let file =
            std::fs::File::create(path).map_err(|_e| Error::GrammarFileWrite(path.to_string()))?;
        if path.ends_with(".gz") {
            let mut encoder =
                flate2::write::GzEncoder::new(BufWriter::new(file), flate2::Compression::default());
            serde_json::to_writer(&mut encoder, self)
                .map_err(|_e| Error::GrammarFileWrite(path.to_string()))?;
            encoder
                .finish()
                .map(|_| ())
                .map_err(|_e| Error::GrammarFileWrite(path.to_string()))
        } else {
            serde_json::to_writer(BufWriter::new(file), self)
                .map_err(|_e| Error::GrammarFileWrite(path.to_string()))
        }
    }
}
