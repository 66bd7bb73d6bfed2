//! Error handling for planmetric
//!
//! Provides error types for the two fallible surfaces of the engine:
//! - Calibration errors (length prompt validation)
//! - Unit errors (parsing user-entered values)
//!
//! All error types use `thiserror` for ergonomic error handling. Every
//! other failure mode in the engine is local and silent by design
//! (clamped zoom, no-op deletes, silent discards of short shapes).

use thiserror::Error;

/// Calibration error type
///
/// Represents rejections of a calibration length submission. A rejected
/// submission never mutates the scale or the committed segment; the
/// prompt stays open for another attempt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// The supplied length could not be parsed as a number
    #[error("Invalid length input: '{0}'")]
    InvalidLength(String),

    /// The supplied length was zero, negative, or not finite
    #[error("Length must be a positive number, got {0}")]
    NonPositiveLength(f64),

    /// The reference segment has (near-)zero pixel length
    #[error("Reference segment is degenerate ({0} px)")]
    DegenerateSegment(f64),

    /// No calibration prompt is currently open
    #[error("No calibration awaiting input")]
    NoPendingRequest,
}

/// Unit parsing error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitsError {
    /// Input is not a valid decimal number
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),

    /// Input is not a valid fraction (`a/b` or `w a/b`)
    #[error("Invalid fraction: '{0}'")]
    InvalidFraction(String),

    /// Unrecognized measurement system or unit name
    #[error("Unknown unit: '{0}'")]
    UnknownUnit(String),
}

/// Umbrella error for the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A calibration submission was rejected.
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    /// A unit value failed to parse.
    #[error(transparent)]
    Units(#[from] UnitsError),
}

/// Convenience result alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
