//! The request-facing facade over the analysis engine.
//!
//! An [`Engine`] owns an immutable [`GrammarStore`] plus the configured
//! estimator and analyzer, and serves the three public operations.  All
//! operations read only immutable state, so one engine can serve any number
//! of threads concurrently.  The engine is also the request boundary of the
//! error taxonomy: empty input and missing grammars surface here as typed
//! errors, while everything below stays total.

pub use crate::engine::error::Error;
use crate::{
    analyzer::{Analyzer, Anomaly},
    kinetics::{Estimator, ProfileEntry},
    optimizer::{self, Optimized},
    store::GrammarStore,
};

mod error {
    /// Error type for engine operations.
    #[derive(thiserror::Error, Debug)]
    pub enum Error {
        /// The request carried no sequence (or only whitespace).
        #[error("no sequence provided")]
        EmptySequence,
        /// No grammar was learned/loaded for the organism.  Distinct from a
        /// loaded grammar yielding no findings.
        #[error("no grammar available for organism {0}")]
        GrammarUnavailable(String),
    }
}

/// Configuration for the engine.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub kinetics: crate::kinetics::Config,
    pub analyzer: crate::analyzer::Config,
}

/// Serves analysis and optimization requests over an immutable store.
pub struct Engine {
    store: GrammarStore,
    estimator: Estimator,
    analyzer: Analyzer,
}

impl Engine {
    pub fn new(config: Config, store: GrammarStore) -> Self {
        Self {
            store,
            estimator: Estimator::new(config.kinetics),
            analyzer: Analyzer::new(config.analyzer),
        }
    }

    /// Read access to the store, e.g., for per-organism readiness queries.
    pub fn store(&self) -> &GrammarStore {
        &self.store
    }

    /// Computes the kinetic pause profile of a nucleotide sequence.
    pub fn kinetic_profile(&self, sequence: &str) -> Result<Vec<ProfileEntry>, Error> {
        let sequence = non_blank(sequence)?;
        Ok(self.estimator.profile(sequence))
    }

    /// Reports codon runs of the sequence that are anomalous under the
    /// organism's grammar.
    pub fn analyze(&self, sequence: &str, organism: &str) -> Result<Vec<Anomaly>, Error> {
        let sequence = non_blank(sequence)?;
        let grammar = self
            .store
            .grammar(organism)
            .ok_or_else(|| Error::GrammarUnavailable(organism.to_string()))?;
        Ok(self.analyzer.analyze(sequence, grammar))
    }

    /// Builds the DNA sequence encoding the protein with the organism's
    /// preferred codons.
    pub fn optimize(&self, protein: &str, organism: &str) -> Result<Optimized, Error> {
        let protein = non_blank(protein)?;
        let grammar = self
            .store
            .grammar(organism)
            .ok_or_else(|| Error::GrammarUnavailable(organism.to_string()))?;
        Ok(optimizer::optimize_sequence(protein, grammar))
    }
}

fn non_blank(input: &str) -> Result<&str, Error> {
    if input.trim().is_empty() {
        Err(Error::EmptySequence)
    } else {
        Ok(input)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::sync::Arc;

    use crate::data::memory;
    use pretty_assertions::assert_eq;

    fn engine() -> Engine {
        let provider = Arc::new(
            memory::Provider::new().with_corpus("ecoli", vec!["ATGAAACCCGGG".to_string()]),
        );
        Engine::new(
            Config::default(),
            crate::store::GrammarStore::learn(provider, &["ecoli", "tardigrade"]),
        )
    }

    #[test]
    fn kinetic_profile_round_trip() -> anyhow::Result<()> {
        let profile = engine().kinetic_profile("GCTTGA")?;
        assert_eq!(profile.len(), 2);
        assert_eq!(profile[0].pause_ms, 206.9);
        Ok(())
    }

    #[test]
    fn empty_input_is_rejected() {
        let engine = engine();
        assert!(matches!(
            engine.kinetic_profile(""),
            Err(Error::EmptySequence)
        ));
        assert!(matches!(
            engine.analyze("  \n", "ecoli"),
            Err(Error::EmptySequence)
        ));
        assert!(matches!(
            engine.optimize("", "ecoli"),
            Err(Error::EmptySequence)
        ));
    }

    #[test]
    fn analysis_distinguishes_unavailable_from_clean() -> anyhow::Result<()> {
        let engine = engine();

        // Loaded grammar, in-grammar sequence: genuinely no findings.
        assert_eq!(engine.analyze("ATGAAACCC", "ecoli")?, vec![]);

        // Failed organism and never-requested organism: unavailable.
        for organism in ["tardigrade", "human"] {
            assert!(matches!(
                engine.analyze("ATGAAACCC", organism),
                Err(Error::GrammarUnavailable(_))
            ));
        }
        Ok(())
    }

    #[test]
    fn optimization_requires_a_grammar() -> anyhow::Result<()> {
        let engine = engine();
        // "M K P G" all occur in the training corpus.
        let optimized = engine.optimize("MKPG", "ecoli")?;
        assert_eq!(optimized.optimized_dna, "ATGAAACCCGGG");

        assert!(matches!(
            engine.optimize("MKPG", "human"),
            Err(Error::GrammarUnavailable(_))
        ));
        Ok(())
    }
}
