//! Definition of the interface for supplying training corpora.

use crate::data::error::Error;

/// Interface for corpus providers.
///
/// A provider supplies, per organism identifier, the ordered collection of
/// raw nucleotide training sequences that the grammar learner consumes.
/// Loading is the only genuinely fallible step of grammar construction and
/// failures stay local to the organism being loaded.
pub trait Provider {
    /// Identifiers of the organisms this provider can supply corpora for.
    fn organisms(&self) -> Vec<String>;

    /// Loads the training corpus for the given organism.
    ///
    /// # Arguments
    ///
    /// * `organism` - Organism identifier, e.g., `"ecoli"`.
    fn load_corpus(&self, organism: &str) -> Result<Vec<String>, Error>;
}
