//! Error type definition.

use thiserror::Error;

/// Error type for corpus access.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no corpus found for organism {0}")]
    NoCorpusFound(String),
    #[error("could not open corpus file: {0}")]
    CorpusOpen(String),
    #[error("could not parse corpus file: {0}")]
    CorpusParse(String),
}
