//! In-memory corpus provider, for tests and embedding callers.

use indexmap::IndexMap;

use crate::data::{error::Error, interface};

/// Provides training corpora from an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct Provider {
    corpora: IndexMap<String, Vec<String>>,
}

impl Provider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a corpus for an organism, replacing any previous one.
    pub fn with_corpus<S: Into<String>>(mut self, organism: S, sequences: Vec<String>) -> Self {
        self.corpora.insert(organism.into(), sequences);
        self
    }
}

impl interface::Provider for Provider {
    fn organisms(&self) -> Vec<String> {
        self.corpora.keys().cloned().collect()
    }

    fn load_corpus(&self, organism: &str) -> Result<Vec<String>, Error> {
        self.corpora
            .get(organism)
            .cloned()
            .ok_or_else(|| Error::NoCorpusFound(organism.to_string()))
    }
}
