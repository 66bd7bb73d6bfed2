use serde::{Deserialize, Serialize};

use super::{GeometryKind, PlanShape, Point};

/// Two-point reference segment the pixel scale is derived from.
///
/// A segment whose length prompt was canceled keeps `real_world_length`
/// as `None`: it stays on the canvas as an inert annotation that never
/// touched the global scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationSegment {
    pub points: [Point; 2],
    /// Real-world length in meters, set on prompt submission.
    pub real_world_length: Option<f64>,
}

impl CalibrationSegment {
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            points: [a, b],
            real_world_length: None,
        }
    }

    pub fn pixel_length(&self) -> f64 {
        self.points[0].distance_to(&self.points[1])
    }

    pub fn is_inert(&self) -> bool {
        self.real_world_length.is_none()
    }
}

impl PlanShape for CalibrationSegment {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Calibration
    }

    fn points(&self) -> &[Point] {
        &self.points
    }
}
