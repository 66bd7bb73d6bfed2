use serde::{Deserialize, Serialize};

use super::{GeometryKind, PlanShape, Point};

/// Closed region. The ring is implicit: the last vertex connects back to
/// the first, which is never duplicated. Holds at least three vertices
/// once committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonRegion {
    pub points: Vec<Point>,
    /// Fill color, assigned from the fixed palette in creation order.
    pub color: String,
}

impl PolygonRegion {
    pub fn new(points: Vec<Point>, color: impl Into<String>) -> Self {
        Self {
            points,
            color: color.into(),
        }
    }

    /// Enclosed area in square image pixels.
    pub fn pixel_area(&self) -> f64 {
        crate::measure::polygon_area_px(&self.points)
    }
}

impl PlanShape for PolygonRegion {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Polygon
    }

    fn points(&self) -> &[Point] {
        &self.points
    }
}
