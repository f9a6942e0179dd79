//! Error types for the Hopfield digit recognizer

use thiserror::Error;

use crate::matrix::MatrixError;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Input pattern length differs from the configured node count
    #[error("Pattern length mismatch: expected {expected} nodes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Matrix operands with incompatible shapes
    #[error("Matrix error: {0}")]
    Matrix(#[from] MatrixError),

    /// A network needs between 1 and `MAX_NODES` nodes
    #[error("Invalid node count: {0}. Must be between 1 and {}.", crate::hopfield::MAX_NODES)]
    InvalidNodeCount(usize),

    /// Weight matrix rejected by `HopfieldNetwork::from_weights`
    #[error("Invalid weight matrix: {0}")]
    InvalidWeights(String),

    /// Glyph text contained something other than '0' or '1'
    #[error("Invalid glyph character {found:?} at position {position}")]
    InvalidGlyph { position: usize, found: char },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Errors caused by caller input rather than by an internal invariant.
    ///
    /// The interactive shell reports these and keeps running.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::LengthMismatch { .. } | Error::InvalidGlyph { .. } | Error::InvalidNodeCount(_)
        )
    }
}
