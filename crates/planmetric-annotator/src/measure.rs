//! Pure measurement geometry.
//!
//! Everything here takes image-space pixel coordinates and returns pixel
//! quantities; conversion to real-world units happens in [`Measurement`]
//! using the single `meters_per_pixel` scalar, and rendering happens at
//! the formatting boundary (`planmetric_core::units`). Nothing is cached:
//! measurements are derived on every read, so a re-calibration can never
//! leave a stale value behind.

use serde::Serialize;

use planmetric_core::units::{self, MeasurementSystem};

use crate::model::Point;

/// Euclidean distance between two image points.
pub fn distance(a: &Point, b: &Point) -> f64 {
    a.distance_to(b)
}

/// Sum of consecutive segment lengths. Zero for fewer than two points.
pub fn polyline_length_px(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// Enclosed area of the closed ring via the shoelace formula, with the
/// vertex after the last wrapping to the first. Zero for fewer than
/// three points.
pub fn polygon_area_px(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum.abs() / 2.0
}

/// A derived real-world measurement.
///
/// `Unavailable` stands for any measurement taken while the session is
/// uncalibrated (`meters_per_pixel == 0`); it renders as "N/A", never as
/// zero or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Measurement {
    Unavailable,
    /// Length in meters.
    Length(f64),
    /// Area in square meters.
    Area(f64),
}

impl Measurement {
    /// Converts a pixel length under the given scale.
    pub fn from_length_px(pixels: f64, meters_per_pixel: f64) -> Self {
        if meters_per_pixel == 0.0 {
            Self::Unavailable
        } else {
            Self::Length(pixels * meters_per_pixel)
        }
    }

    /// Converts a square-pixel area under the given scale.
    pub fn from_area_px(square_pixels: f64, meters_per_pixel: f64) -> Self {
        if meters_per_pixel == 0.0 {
            Self::Unavailable
        } else {
            Self::Area(square_pixels * meters_per_pixel * meters_per_pixel)
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }

    /// Renders the measurement in the given display system.
    pub fn format(&self, system: MeasurementSystem) -> String {
        match self {
            Self::Unavailable => "N/A".to_string(),
            Self::Length(meters) => units::format_length(*meters, system),
            Self::Area(square_meters) => units::format_area(*square_meters, system),
        }
    }
}
