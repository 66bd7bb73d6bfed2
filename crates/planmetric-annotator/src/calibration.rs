//! Two-click calibration workflow.
//!
//! The first click in calibrate mode arms a reference point (no shape
//! exists yet). The second click commits the two-point segment as a
//! regular annotation and opens a request the host presents as a length
//! prompt. Submitting a valid length converts it to meters and produces
//! the new `meters_per_pixel` scalar; canceling leaves the committed
//! segment behind, inert.

use tracing::debug;

use planmetric_core::error::CalibrationError;
use planmetric_core::units::{self, LengthUnit};

use crate::model::Point;

/// Prompt data handed to the host once the second reference point lands.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationRequest {
    /// Id of the committed (still inert) calibration annotation.
    pub shape_id: String,
    /// Pixel length of the reference segment.
    pub pixel_length: f64,
}

/// Result of a validated length submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationOutcome {
    pub shape_id: String,
    /// Submitted reference length, in meters.
    pub real_world_meters: f64,
    /// The new global scale.
    pub meters_per_pixel: f64,
}

/// State of the two-click workflow.
#[derive(Debug, Clone, Default)]
pub struct Calibrator {
    first_point: Option<Point>,
    request: Option<CalibrationRequest>,
}

impl Calibrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between the first and second reference clicks.
    pub fn awaiting_second(&self) -> bool {
        self.first_point.is_some()
    }

    /// True while a length prompt is open.
    pub fn is_pending(&self) -> bool {
        self.request.is_some()
    }

    pub fn request(&self) -> Option<&CalibrationRequest> {
        self.request.as_ref()
    }

    /// Arms the first reference point.
    pub fn begin(&mut self, point: Point) {
        debug!(x = point.x, y = point.y, "calibration armed");
        self.first_point = Some(point);
    }

    /// Takes the armed first point so the caller can commit the segment.
    pub fn take_first(&mut self) -> Option<Point> {
        self.first_point.take()
    }

    /// Registers the prompt for a freshly committed segment.
    pub fn open_request(&mut self, shape_id: String, pixel_length: f64) {
        self.request = Some(CalibrationRequest {
            shape_id,
            pixel_length,
        });
    }

    /// Validates a submitted length and computes the new scale.
    ///
    /// On any error nothing is consumed: the request stays open for
    /// another attempt and the committed segment is untouched.
    pub fn submit(
        &mut self,
        input: &str,
        unit: LengthUnit,
    ) -> Result<CalibrationOutcome, CalibrationError> {
        let request = self
            .request
            .as_ref()
            .ok_or(CalibrationError::NoPendingRequest)?;

        let value = units::parse_value(input)
            .map_err(|_| CalibrationError::InvalidLength(input.to_string()))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(CalibrationError::NonPositiveLength(value));
        }
        if request.pixel_length <= f64::EPSILON {
            return Err(CalibrationError::DegenerateSegment(request.pixel_length));
        }

        let meters = value * unit.meters_per_unit();
        let outcome = CalibrationOutcome {
            shape_id: request.shape_id.clone(),
            real_world_meters: meters,
            meters_per_pixel: meters / request.pixel_length,
        };
        self.request = None;
        Ok(outcome)
    }

    /// Closes the prompt without touching the scale. The committed
    /// two-point segment stays behind as an inert annotation.
    pub fn cancel(&mut self) -> Option<CalibrationRequest> {
        self.first_point = None;
        self.request.take()
    }

    /// Drops any armed point and open prompt (tool switched away).
    pub fn reset(&mut self) {
        self.first_point = None;
        self.request = None;
    }
}
