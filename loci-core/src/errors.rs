use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocusError {
    #[error("Child locus {child} is not within the scope of locus {parent}")]
    OutOfScope { parent: String, child: String },

    #[error("Chromosomes do not match: {0} vs {1}")]
    ChromosomeMismatch(String, String),

    #[error("Invalid comparison parameters: {0}")]
    InvalidComparisonParameters(String),

    #[error("LocusSet '{0}' has already been squished")]
    AlreadyReduced(String),

    #[error("Index {index} is out of range for {len} loci")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Cannot read field '{field}' of locus {locus} as {expected}")]
    FilterValue {
        field: String,
        locus: String,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, LocusError>;
