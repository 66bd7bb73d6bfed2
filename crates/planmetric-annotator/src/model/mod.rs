//! Shape model for the annotation engine.
//!
//! Every coordinate in the model lives in untransformed image space;
//! device coordinates never reach it. Committed shapes are one of three
//! concrete records behind the [`Geometry`] tagged union: a two-point
//! calibration segment, an open polyline, or a closed polygon.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod calibration;
mod polygon;
mod polyline;

pub use calibration::CalibrationSegment;
pub use polygon::PolygonRegion;
pub use polyline::PolylinePath;

/// A position in image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Discriminant for the three annotation geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    Calibration,
    Polyline,
    Polygon,
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calibration => write!(f, "Calibration"),
            Self::Polyline => write!(f, "Polyline"),
            Self::Polygon => write!(f, "Polygon"),
        }
    }
}

/// Common surface over the concrete geometry records.
pub trait PlanShape {
    fn kind(&self) -> GeometryKind;
    fn points(&self) -> &[Point];

    /// Axis-aligned bounding box `(min_x, min_y, max_x, max_y)`.
    fn bounds(&self) -> (f64, f64, f64, f64) {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in self.points() {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        (min_x, min_y, max_x, max_y)
    }
}

/// Tagged union over the concrete shape records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Calibration(CalibrationSegment),
    Polyline(PolylinePath),
    Polygon(PolygonRegion),
}

impl PlanShape for Geometry {
    fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Calibration(s) => s.kind(),
            Geometry::Polyline(s) => s.kind(),
            Geometry::Polygon(s) => s.kind(),
        }
    }

    fn points(&self) -> &[Point] {
        match self {
            Geometry::Calibration(s) => s.points(),
            Geometry::Polyline(s) => s.points(),
            Geometry::Polygon(s) => s.points(),
        }
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            Geometry::Calibration(s) => s.bounds(),
            Geometry::Polyline(s) => s.bounds(),
            Geometry::Polygon(s) => s.bounds(),
        }
    }
}

/// A committed shape with its user-facing metadata.
///
/// Ids are session-unique and immutable once assigned. Names default to
/// `"Line N"` / `"Area N"` / `"Calibration N"` and are user-editable but
/// never empty after commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    pub geometry: Geometry,
}

impl Annotation {
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            notes: String::new(),
            geometry,
        }
    }

    pub fn kind(&self) -> GeometryKind {
        self.geometry.kind()
    }

    /// Fill color, present on polygons only.
    pub fn color(&self) -> Option<&str> {
        match &self.geometry {
            Geometry::Polygon(region) => Some(&region.color),
            _ => None,
        }
    }
}
