//! The per-organism grammar store.
//!
//! Building the store is an explicit startup phase: grammars are learned
//! (or loaded from persisted JSON) exactly once, per-organism failures are
//! recorded instead of propagated, and the resulting store is immutable.
//! Without interior mutability the store is freely shareable across
//! request-handling threads and a double-learning race cannot occur.

use std::{sync::Arc, time::Instant};

use indexmap::IndexMap;

use crate::{data::interface::Provider, grammar::Grammar};

/// Load outcome for one organism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganismStatus {
    /// Grammar available; holds the number of distinct subroutines.
    Loaded { subroutines: usize },
    /// Corpus or grammar file could not be obtained; the organism stays
    /// absent and analysis/optimization for it report "unavailable".
    Failed { reason: String },
}

/// Immutable-after-build store of learned grammars, keyed by organism.
pub struct GrammarStore {
    grammars: IndexMap<String, Grammar>,
    statuses: IndexMap<String, OrganismStatus>,
}

impl GrammarStore {
    /// Learns grammars for the given organisms from a corpus provider.
    ///
    /// Never fails as a whole: an organism whose corpus cannot be loaded is
    /// recorded as `Failed` (and logged) while the others proceed.
    pub fn learn(provider: Arc<dyn Provider + Send + Sync>, organisms: &[&str]) -> Self {
        let mut result = Self {
            grammars: IndexMap::new(),
            statuses: IndexMap::new(),
        };
        for &organism in organisms {
            match provider.load_corpus(organism) {
                Ok(corpus) => {
                    let start = Instant::now();
                    let grammar = Grammar::learn(&corpus);
                    log::debug!(
                        "learned grammar for {}: {} subroutines from {} sequences in {:?}",
                        organism,
                        grammar.len(),
                        corpus.len(),
                        start.elapsed()
                    );
                    result.insert_loaded(organism, grammar);
                }
                Err(e) => result.insert_failed(organism, &e.to_string()),
            }
        }
        result
    }

    /// Learns grammars for every organism the provider advertises.
    pub fn learn_all(provider: Arc<dyn Provider + Send + Sync>) -> Self {
        let organisms = provider.organisms();
        let organisms: Vec<&str> = organisms.iter().map(|s| s.as_str()).collect();
        Self::learn(provider, &organisms)
    }

    /// Loads persisted grammars from JSON files, one per organism.
    ///
    /// Paths ending in `.gz` are gzip-decoded.  Same per-organism failure
    /// isolation as [`GrammarStore::learn`].
    pub fn from_json_files(paths: &IndexMap<String, String>) -> Self {
        let mut result = Self {
            grammars: IndexMap::new(),
            statuses: IndexMap::new(),
        };
        for (organism, path) in paths {
            match Grammar::from_json_file(path) {
                Ok(grammar) => result.insert_loaded(organism, grammar),
                Err(e) => result.insert_failed(organism, &e.to_string()),
            }
        }
        result
    }

    fn insert_loaded(&mut self, organism: &str, grammar: Grammar) {
        self.statuses.insert(
            organism.to_string(),
            OrganismStatus::Loaded {
                subroutines: grammar.len(),
            },
        );
        self.grammars.insert(organism.to_string(), grammar);
    }

    fn insert_failed(&mut self, organism: &str, reason: &str) {
        log::warn!("grammar for {} unavailable: {}", organism, reason);
        self.statuses.insert(
            organism.to_string(),
            OrganismStatus::Failed {
                reason: reason.to_string(),
            },
        );
    }

    /// The learned grammar for an organism, if available.
    pub fn grammar(&self, organism: &str) -> Option<&Grammar> {
        self.grammars.get(organism)
    }

    /// Load outcome for an organism; `None` if it was never requested.
    pub fn status(&self, organism: &str) -> Option<&OrganismStatus> {
        self.statuses.get(organism)
    }

    /// Load outcomes for all requested organisms, in registration order.
    pub fn statuses(&self) -> &IndexMap<String, OrganismStatus> {
        &self.statuses
    }

    /// All requested organisms, in registration order.
    pub fn organisms(&self) -> Vec<String> {
        self.statuses.keys().cloned().collect()
    }

    pub fn is_loaded(&self, organism: &str) -> bool {
        self.grammars.contains_key(organism)
    }
}
