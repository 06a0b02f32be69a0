//! Error type shared by every stage of the block-sorting front-end.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BurrowsError {
    /// A required input was missing, empty, or outside its valid range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A stream that could not have come from the matching forward stage
    /// (for example a header cut short).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BurrowsError>;
