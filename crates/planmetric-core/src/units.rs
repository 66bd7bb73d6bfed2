//! Unit conversion utilities
//!
//! Handles conversion between Metric (meters) and Imperial (feet) display
//! systems and parsing of user-entered lengths. Internally every stored
//! length is meters and every stored area is square meters; conversion
//! happens only at the formatting and input boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    FEET_PER_METER, METERS_PER_FOOT, METERS_PER_INCH, SQUARE_FEET_PER_SQUARE_METER,
};
use crate::error::UnitsError;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (meters / square meters)
    Metric,
    /// Imperial system (feet / square feet)
    Imperial,
}

impl Default for MeasurementSystem {
    fn default() -> Self {
        Self::Metric
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = UnitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "m" => Ok(Self::Metric),
            "imperial" | "ft" | "feet" => Ok(Self::Imperial),
            _ => Err(UnitsError::UnknownUnit(s.to_string())),
        }
    }
}

/// Unit a calibration length is entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Meters,
    Centimeters,
    Feet,
    Inches,
}

impl LengthUnit {
    /// Conversion factor from this unit to meters.
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Centimeters => 0.01,
            Self::Feet => METERS_PER_FOOT,
            Self::Inches => METERS_PER_INCH,
        }
    }

    /// The unit a bare number defaults to in the given system.
    pub fn primary(system: MeasurementSystem) -> Self {
        match system {
            MeasurementSystem::Metric => Self::Meters,
            MeasurementSystem::Imperial => Self::Feet,
        }
    }

    /// Short label for display ("m", "cm", "ft", "in").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Centimeters => "cm",
            Self::Feet => "ft",
            Self::Inches => "in",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = UnitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m" | "meter" | "meters" => Ok(Self::Meters),
            "cm" | "centimeter" | "centimeters" => Ok(Self::Centimeters),
            "ft" | "foot" | "feet" => Ok(Self::Feet),
            "in" | "inch" | "inches" => Ok(Self::Inches),
            _ => Err(UnitsError::UnknownUnit(s.to_string())),
        }
    }
}

/// Format a length for display
///
/// * `meters` - Length in meters
/// * `system` - Target measurement system
///
/// Metric renders meters with 2 decimals at or above one meter, otherwise
/// whole centimeters. Imperial renders feet with 2 decimals at or above
/// one foot, otherwise whole inches.
pub fn format_length(meters: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => {
            if meters >= 1.0 {
                format!("{:.2} m", meters)
            } else {
                format!("{:.0} cm", meters * 100.0)
            }
        }
        MeasurementSystem::Imperial => {
            let feet = meters * FEET_PER_METER;
            if feet >= 1.0 {
                format!("{:.2} ft", feet)
            } else {
                format!("{:.0} in", feet * 12.0)
            }
        }
    }
}

/// Format an area for display
///
/// * `square_meters` - Area in square meters
/// * `system` - Target measurement system
pub fn format_area(square_meters: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.2} m²", square_meters),
        MeasurementSystem::Imperial => {
            format!("{:.2} ft²", square_meters * SQUARE_FEET_PER_SQUARE_METER)
        }
    }
}

/// Parse a user-entered numeric value
///
/// Accepts plain decimals and the fractional forms common in imperial
/// entry: `"3/4"`, `"1 1/2"`. An empty string parses as 0 so the caller's
/// positivity check owns the rejection.
pub fn parse_value(input: &str) -> Result<f64, UnitsError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    if input.contains('/') {
        let mut total = 0.0;
        for part in input.split_whitespace() {
            if let Some((num, den)) = part.split_once('/') {
                if den.contains('/') {
                    return Err(UnitsError::InvalidFraction(part.to_string()));
                }
                let num = num
                    .parse::<f64>()
                    .map_err(|_| UnitsError::InvalidFraction(part.to_string()))?;
                let den = den
                    .parse::<f64>()
                    .map_err(|_| UnitsError::InvalidFraction(part.to_string()))?;
                if den == 0.0 {
                    return Err(UnitsError::InvalidFraction(part.to_string()));
                }
                total += num / den;
            } else {
                total += part
                    .parse::<f64>()
                    .map_err(|_| UnitsError::InvalidNumber(part.to_string()))?;
            }
        }
        Ok(total)
    } else {
        input
            .parse::<f64>()
            .map_err(|_| UnitsError::InvalidNumber(input.to_string()))
    }
}

/// Parse a user-entered length into meters
///
/// * `input` - String to parse (decimal or fractional)
/// * `unit` - Unit the value is expressed in
pub fn parse_length(input: &str, unit: LengthUnit) -> Result<f64, UnitsError> {
    Ok(parse_value(input)? * unit.meters_per_unit())
}
