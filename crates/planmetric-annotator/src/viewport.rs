//! Viewport and coordinate transformation for the annotation surface.
//!
//! Handles conversion between device coordinates (host pointer space) and
//! image coordinates (the untransformed plan raster). Manages pan and
//! pointer-anchored zoom.

use std::fmt;

use serde::{Deserialize, Serialize};

use planmetric_core::constants::{FIT_PADDING, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

use crate::model::Point;

/// Viewport transformation state (scale and pan offset).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    surface_width: f64,
    surface_height: f64,
}

impl Viewport {
    /// Creates a viewport for a rendering surface of the given size.
    pub fn new(surface_width: f64, surface_height: f64) -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            surface_width,
            surface_height,
        }
    }

    pub fn surface_width(&self) -> f64 {
        self.surface_width
    }

    pub fn surface_height(&self) -> f64 {
        self.surface_height
    }

    /// Sets the surface dimensions (typically called when the host resizes).
    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.surface_width = width;
        self.surface_height = height;
    }

    /// Gets the current scale (1.0 = 100%).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Sets the scale, clamped to the allowed range. Out-of-range requests
    /// are clamped, never rejected.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.offset_x = x;
        self.offset_y = y;
    }

    /// Pans by a device-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Converts device coordinates to image coordinates.
    ///
    /// Formula:
    /// ```text
    /// image = (device - offset) / scale
    /// ```
    pub fn device_to_image(&self, device_x: f64, device_y: f64) -> Point {
        Point::new(
            (device_x - self.offset_x) / self.scale,
            (device_y - self.offset_y) / self.scale,
        )
    }

    /// Converts image coordinates to device coordinates.
    ///
    /// Formula:
    /// ```text
    /// device = image * scale + offset
    /// ```
    pub fn image_to_device(&self, point: &Point) -> (f64, f64) {
        (
            point.x * self.scale + self.offset_x,
            point.y * self.scale + self.offset_y,
        )
    }

    /// Rescales while keeping the image coordinate under the pointer fixed.
    ///
    /// The pointed image coordinate is computed under the old scale, the
    /// new (clamped) scale is applied, and the offset is recomputed so the
    /// same image coordinate stays under the pointer.
    pub fn zoom_to_point(&mut self, device_x: f64, device_y: f64, new_scale: f64) {
        let anchor = self.device_to_image(device_x, device_y);
        self.scale = new_scale.clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset_x = device_x - anchor.x * self.scale;
        self.offset_y = device_y - anchor.y * self.scale;
    }

    /// One zoom step in, anchored at the pointer.
    pub fn zoom_in_at(&mut self, device_x: f64, device_y: f64) {
        self.zoom_to_point(device_x, device_y, self.scale * ZOOM_STEP);
    }

    /// One zoom step out, anchored at the pointer.
    pub fn zoom_out_at(&mut self, device_x: f64, device_y: f64) {
        self.zoom_to_point(device_x, device_y, self.scale / ZOOM_STEP);
    }

    /// Applies `steps` discrete zoom steps (positive zooms in), anchored
    /// at the pointer.
    pub fn zoom_steps(&mut self, steps: i32, device_x: f64, device_y: f64) {
        if steps == 0 {
            return;
        }
        let factor = ZOOM_STEP.powi(steps);
        self.zoom_to_point(device_x, device_y, self.scale * factor);
    }

    /// Fits an image of the given pixel size into the surface, centered,
    /// with a small padding margin per edge.
    pub fn fit_to_image(&mut self, image_width: f64, image_height: f64) {
        if image_width <= 0.0 || image_height <= 0.0 {
            return;
        }

        let padding_factor = 1.0 - FIT_PADDING * 2.0;
        let scale_x = self.surface_width * padding_factor / image_width;
        let scale_y = self.surface_height * padding_factor / image_height;
        self.scale = scale_x.min(scale_y).clamp(MIN_ZOOM, MAX_ZOOM);

        self.offset_x = (self.surface_width - image_width * self.scale) / 2.0;
        self.offset_y = (self.surface_height - image_height * self.scale) / 2.0;
    }

    /// Resets to the default transform (1:1 scale, zero offset).
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Offset: ({:.1}, {:.1})",
            self.scale, self.offset_x, self.offset_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
