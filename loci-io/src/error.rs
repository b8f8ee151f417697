use std::io;
use thiserror::Error;

use loci_core::errors::LocusError;

/// Error type for loci-io operations.
#[derive(Error, Debug)]
pub enum TranslateError {
    /// A line could not be turned into a locus.
    #[error("Illegal data format: {0}")]
    IllegalDataFormat(String),

    /// No translator handles the file name.
    #[error("No recognized translation scheme for file: {0}")]
    UnsupportedFileType(String),

    /// A decode error, located in its input.
    #[error("Problem reading {set} at line {line}: {source}")]
    AtLine {
        set: String,
        line: usize,
        #[source]
        source: Box<TranslateError>,
    },

    /// The decoded loci violate a locus invariant.
    #[error(transparent)]
    Locus(#[from] LocusError),

    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for loci-io operations.
pub type Result<T> = std::result::Result<T, TranslateError>;
