//! # Planmetric Core
//!
//! Core types and utilities for the planmetric measurement engine.
//! Provides unit systems and conversion, error types, and the constants
//! shared by the annotator crate and any host glue built on top of it.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{CalibrationError, Error, Result, UnitsError};
pub use units::{LengthUnit, MeasurementSystem};
