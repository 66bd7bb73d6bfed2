//! Pointer, wheel and hotkey handling for the workbench.
//!
//! Every handler runs to completion inside the host's event dispatch;
//! there is no background work. Pointer positions arrive in device
//! coordinates and are converted through the viewport before they touch
//! any shape. Double-click-to-finish is a host gesture: the host calls
//! [`Workbench::finish_current`] for it, same as for an explicit finish
//! button.

use tracing::debug;

use super::{CropRect, HotKey, ToolMode, Workbench};
use crate::model::{Annotation, CalibrationSegment, Geometry, PolygonRegion, PolylinePath};
use crate::palette;

impl Workbench {
    /// Pointer-down in device coordinates.
    pub fn pointer_pressed(&mut self, device_x: f64, device_y: f64) {
        match self.tool {
            ToolMode::Pan => {
                self.pan_anchor = Some((device_x, device_y));
            }
            ToolMode::Calibrate => self.calibrate_click(device_x, device_y),
            ToolMode::Polyline => {
                let p = self.viewport.device_to_image(device_x, device_y);
                self.current_points.push(p);
            }
            ToolMode::Polygon => self.polygon_click(device_x, device_y),
            ToolMode::Crop => {
                self.crop_anchor = Some(self.viewport.device_to_image(device_x, device_y));
                self.crop_selection = None;
            }
        }
    }

    /// Pointer-move in device coordinates.
    pub fn pointer_moved(&mut self, device_x: f64, device_y: f64) {
        match self.tool {
            ToolMode::Pan => {
                if let Some((last_x, last_y)) = self.pan_anchor {
                    self.viewport.pan_by(device_x - last_x, device_y - last_y);
                    self.pan_anchor = Some((device_x, device_y));
                }
            }
            ToolMode::Crop => {
                if let Some(anchor) = self.crop_anchor {
                    let p = self.viewport.device_to_image(device_x, device_y);
                    self.crop_selection = Some(CropRect::from_corners(anchor, p));
                }
            }
            _ => {}
        }
    }

    /// Pointer-up in device coordinates.
    pub fn pointer_released(&mut self, device_x: f64, device_y: f64) {
        match self.tool {
            ToolMode::Pan => {
                self.pan_anchor = None;
            }
            ToolMode::Crop => {
                if let Some(anchor) = self.crop_anchor.take() {
                    let p = self.viewport.device_to_image(device_x, device_y);
                    self.crop_selection = Some(CropRect::from_corners(anchor, p));
                }
            }
            _ => {}
        }
    }

    /// Discrete wheel zoom, anchored at the pointer. Positive steps zoom
    /// in; out-of-range results are clamped by the viewport.
    pub fn wheel_zoom(&mut self, steps: i32, device_x: f64, device_y: f64) {
        self.viewport.zoom_steps(steps, device_x, device_y);
    }

    /// Hotkey press. Ignored entirely while a text input has focus.
    pub fn hotkey_pressed(&mut self, key: HotKey) {
        if self.text_input_focused {
            return;
        }
        match key {
            HotKey::PanHold => {
                if self.suspended_tool.is_none() && self.tool != ToolMode::Pan {
                    self.suspended_tool = Some(self.tool);
                    self.tool = ToolMode::Pan;
                    debug!("temporary pan started (key held)");
                }
            }
            HotKey::Undo => self.undo(),
            HotKey::Cancel => {
                if let Some(previous) = self.suspended_tool.take() {
                    self.tool = previous;
                    self.pan_anchor = None;
                } else {
                    self.discard_current();
                    self.tool = ToolMode::Pan;
                }
            }
        }
    }

    /// Hotkey release. Releasing the pan trigger restores the suspended
    /// tool; construction resumes with the same points.
    pub fn hotkey_released(&mut self, key: HotKey) {
        if self.text_input_focused {
            return;
        }
        if key == HotKey::PanHold {
            if let Some(previous) = self.suspended_tool.take() {
                self.tool = previous;
                self.pan_anchor = None;
                debug!(?previous, "temporary pan ended (key released)");
            }
        }
    }

    /// Commits the shape under construction, if it qualifies.
    ///
    /// Polylines need at least 2 points, polygons at least 3; anything
    /// shorter is discarded silently. Either way the tool returns to
    /// `Pan`.
    pub fn finish_current(&mut self) {
        match self.tool {
            ToolMode::Polyline => {
                if self.current_points.len() >= 2 {
                    self.commit_polyline();
                } else {
                    debug!(
                        points = self.current_points.len(),
                        "polyline too short, discarded"
                    );
                    self.current_points.clear();
                }
                self.tool = ToolMode::Pan;
            }
            ToolMode::Polygon => {
                if self.current_points.len() >= 3 {
                    self.commit_polygon();
                } else {
                    debug!(
                        points = self.current_points.len(),
                        "polygon too short, discarded"
                    );
                    self.current_points.clear();
                }
                self.tool = ToolMode::Pan;
            }
            _ => {}
        }
    }

    /// Drops the shape or calibration in progress without committing.
    pub(crate) fn discard_current(&mut self) {
        if !self.current_points.is_empty() || self.calibrator.awaiting_second() {
            debug!("construction discarded");
        }
        self.current_points.clear();
        self.calibrator.cancel();
        self.crop_anchor = None;
    }

    fn calibrate_click(&mut self, device_x: f64, device_y: f64) {
        if self.calibrator.is_pending() {
            debug!("length prompt open, click ignored");
            return;
        }
        let p = self.viewport.device_to_image(device_x, device_y);
        match self.calibrator.take_first() {
            None => self.calibrator.begin(p),
            Some(first) => {
                self.record_history();
                self.calibration_count += 1;
                let segment = CalibrationSegment::new(first, p);
                let pixel_length = segment.pixel_length();
                let annotation = Annotation::new(
                    format!("Calibration {}", self.calibration_count),
                    Geometry::Calibration(segment),
                );
                let id = annotation.id.clone();
                self.store.add(annotation);
                self.calibrator.open_request(id, pixel_length);
            }
        }
    }

    fn polygon_click(&mut self, device_x: f64, device_y: f64) {
        let p = self.viewport.device_to_image(device_x, device_y);
        if self.current_points.len() >= 3 {
            // Close threshold is defined in device pixels, so it shrinks
            // in image space as the view zooms in.
            let threshold = self.settings.close_threshold_px / self.viewport.scale();
            if p.distance_to(&self.current_points[0]) <= threshold {
                // The ring reuses the existing first vertex; the closing
                // click is not appended.
                self.commit_polygon();
                self.tool = ToolMode::Pan;
                return;
            }
        }
        self.current_points.push(p);
    }

    fn commit_polyline(&mut self) {
        self.record_history();
        self.line_count += 1;
        let points = std::mem::take(&mut self.current_points);
        let annotation = Annotation::new(
            format!("Line {}", self.line_count),
            Geometry::Polyline(PolylinePath::new(points)),
        );
        self.store.add(annotation);
    }

    fn commit_polygon(&mut self) {
        self.record_history();
        self.area_count += 1;
        let color = palette::assign_color(&self.store.polygon_colors(), self.area_count - 1);
        let points = std::mem::take(&mut self.current_points);
        let annotation = Annotation::new(
            format!("Area {}", self.area_count),
            Geometry::Polygon(PolygonRegion::new(points, color)),
        );
        self.store.add(annotation);
    }
}
