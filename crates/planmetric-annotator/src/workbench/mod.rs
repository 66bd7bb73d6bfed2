//! Workbench state manager for host integration.
//! Owns the engine state and turns host events into shape mutations.
//!
//! This module is split into submodules:
//! - `input`: pointer, wheel and hotkey handling, shape-in-progress
//!   lifecycle
//!
//! The workbench is a plain state object with mutator methods; it knows
//! nothing about rendering or widgets. The host feeds it device-space
//! events and reads back shapes, the measurement table, and the viewport
//! transform.

mod input;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use planmetric_core::error::CalibrationError;
use planmetric_core::units::{self, LengthUnit, MeasurementSystem};

use crate::calibration::{CalibrationRequest, Calibrator};
use crate::config::WorkbenchSettings;
use crate::history::{Snapshot, SnapshotHistory};
use crate::model::{Annotation, Point};
use crate::shape_store::{MeasurementRow, ShapeStore};
use crate::viewport::Viewport;

/// Active tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    Pan,
    Calibrate,
    Polyline,
    Polygon,
    Crop,
}

/// Hotkeys the host forwards. The actual key bindings live host-side;
/// the engine only sees the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotKey {
    /// Held to pan without losing the shape in progress.
    PanHold,
    Undo,
    Cancel,
}

/// Axis-aligned scratch selection produced by the crop tool, in image
/// space. Never becomes an annotation; the external exporter consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// Builds a normalized rectangle from two drag corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }
}

/// Workbench state for host integration.
#[derive(Debug, Clone)]
pub struct Workbench {
    pub(crate) store: ShapeStore,
    pub(crate) viewport: Viewport,
    pub(crate) history: SnapshotHistory,
    pub(crate) settings: WorkbenchSettings,
    pub(crate) tool: ToolMode,
    /// Vertices of the shape under construction (empty when idle).
    pub(crate) current_points: Vec<Point>,
    pub(crate) calibrator: Calibrator,
    /// Previous tool while a temporary pan is active.
    pub(crate) suspended_tool: Option<ToolMode>,
    /// Last device position during a pan drag.
    pub(crate) pan_anchor: Option<(f64, f64)>,
    /// Image-space anchor of a crop drag.
    pub(crate) crop_anchor: Option<Point>,
    pub(crate) crop_selection: Option<CropRect>,
    pub(crate) text_input_focused: bool,
    pub(crate) line_count: usize,
    pub(crate) area_count: usize,
    pub(crate) calibration_count: usize,
}

impl Workbench {
    /// Creates a workbench for a rendering surface of the given size.
    pub fn new(surface_width: f64, surface_height: f64) -> Self {
        Self::with_settings(surface_width, surface_height, WorkbenchSettings::default())
    }

    pub fn with_settings(
        surface_width: f64,
        surface_height: f64,
        settings: WorkbenchSettings,
    ) -> Self {
        Self {
            store: ShapeStore::new(),
            viewport: Viewport::new(surface_width, surface_height),
            history: SnapshotHistory::new(settings.history_capacity),
            settings,
            tool: ToolMode::Pan,
            current_points: Vec::new(),
            calibrator: Calibrator::new(),
            suspended_tool: None,
            pan_anchor: None,
            crop_anchor: None,
            crop_selection: None,
            text_input_focused: false,
            line_count: 0,
            area_count: 0,
            calibration_count: 0,
        }
    }

    pub fn settings(&self) -> &WorkbenchSettings {
        &self.settings
    }

    /// Switches the display/entry unit system. Measurements are derived
    /// on read, so every table row reflects the change immediately.
    pub fn set_units(&mut self, units: MeasurementSystem) {
        self.settings.units = units;
    }

    pub fn units(&self) -> MeasurementSystem {
        self.settings.units
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    /// True while a temporary pan override suspends another tool.
    pub fn in_temporary_pan(&self) -> bool {
        self.suspended_tool.is_some()
    }

    /// True while a shape or calibration is under construction.
    pub fn construction_in_progress(&self) -> bool {
        !self.current_points.is_empty() || self.calibrator.awaiting_second()
    }

    /// Selects a tool.
    ///
    /// With a shape in progress, selecting `Pan` suspends the current
    /// tool instead of discarding the work (temporary pan); re-selecting
    /// the suspended tool resumes construction with the same points.
    /// Selecting any other tool discards the work in progress.
    pub fn set_tool(&mut self, tool: ToolMode) {
        if let Some(previous) = self.suspended_tool {
            if tool == ToolMode::Pan {
                return;
            }
            self.suspended_tool = None;
            if tool == previous {
                self.tool = previous;
                debug!(?tool, "temporary pan ended, construction resumed");
                return;
            }
            self.discard_current();
            self.tool = tool;
            return;
        }

        if tool == self.tool {
            return;
        }

        if self.construction_in_progress() {
            if tool == ToolMode::Pan {
                self.suspended_tool = Some(self.tool);
                self.tool = ToolMode::Pan;
                debug!("temporary pan started");
                return;
            }
            self.discard_current();
        }

        self.tool = tool;
    }

    /// Hotkeys are dropped entirely while the host reports a focused
    /// text input.
    pub fn set_text_input_focus(&mut self, focused: bool) {
        self.text_input_focused = focused;
    }

    // --- Viewport ------------------------------------------------------

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.viewport.set_surface_size(width, height);
    }

    /// Fits a plan image of the given pixel size into the surface.
    pub fn fit_to_image(&mut self, image_width: f64, image_height: f64) {
        self.viewport.fit_to_image(image_width, image_height);
    }

    // --- Committed state and derived outputs ---------------------------

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.store.annotations()
    }

    pub fn meters_per_pixel(&self) -> f64 {
        self.store.meters_per_pixel()
    }

    pub fn is_calibrated(&self) -> bool {
        self.store.is_calibrated()
    }

    /// Vertices of the shape under construction, for live preview.
    pub fn current_points(&self) -> &[Point] {
        &self.current_points
    }

    /// The derived measurement table in the active unit system.
    pub fn measurement_table(&self) -> Vec<MeasurementRow> {
        self.store.measurement_table(self.settings.units)
    }

    /// The current crop scratch selection, if any.
    pub fn crop_selection(&self) -> Option<CropRect> {
        self.crop_selection
    }

    /// Hands the crop selection to the exporter, clearing it.
    pub fn take_crop_selection(&mut self) -> Option<CropRect> {
        self.crop_selection.take()
    }

    // --- Calibration prompt --------------------------------------------

    /// The open length prompt, if the second reference click landed.
    pub fn calibration_request(&self) -> Option<&CalibrationRequest> {
        self.calibrator.request()
    }

    /// Applies a submitted calibration length.
    ///
    /// On success the previous state is snapshotted before the new scale
    /// lands, the scalar is overwritten, and the committed segment is
    /// renamed to embed the formatted length. On error nothing changes
    /// and the prompt stays open.
    pub fn submit_calibration(
        &mut self,
        input: &str,
        unit: LengthUnit,
    ) -> Result<f64, CalibrationError> {
        let outcome = self.calibrator.submit(input, unit)?;

        self.record_history();
        self.store.set_meters_per_pixel(outcome.meters_per_pixel);

        let label = units::format_length(outcome.real_world_meters, self.settings.units);
        if let Some(annotation) = self.store.get_mut(&outcome.shape_id) {
            if let crate::model::Geometry::Calibration(segment) = &mut annotation.geometry {
                segment.real_world_length = Some(outcome.real_world_meters);
            }
            annotation.name = format!("Calibration ({label})");
        }

        self.tool = ToolMode::Pan;
        debug!(
            meters_per_pixel = outcome.meters_per_pixel,
            "calibration applied"
        );
        Ok(outcome.meters_per_pixel)
    }

    /// Closes the length prompt without touching the scale. The committed
    /// two-point segment stays behind, inert.
    pub fn cancel_calibration(&mut self) {
        if self.calibrator.cancel().is_some() {
            debug!("calibration prompt canceled, segment kept inert");
        }
        self.tool = ToolMode::Pan;
    }

    // --- Direct shape edits --------------------------------------------

    pub fn rename_annotation(&mut self, id: &str, name: &str) -> bool {
        if name.trim().is_empty() {
            warn!(%id, "refusing empty annotation name");
            return false;
        }
        if self.store.get(id).is_none() {
            return false;
        }
        self.record_history();
        self.store.rename(id, name)
    }

    pub fn set_annotation_notes(&mut self, id: &str, notes: &str) -> bool {
        if self.store.get(id).is_none() {
            return false;
        }
        self.record_history();
        self.store.set_notes(id, notes)
    }

    /// Recolors a polygon; other kinds carry no color.
    pub fn set_annotation_color(&mut self, id: &str, color: &str) -> bool {
        match self.store.get(id) {
            Some(annotation) if annotation.color().is_some() => {}
            _ => return false,
        }
        self.record_history();
        self.store.set_color(id, color)
    }

    /// Deletes by id. Unknown ids are a no-op.
    pub fn delete_annotation(&mut self, id: &str) -> bool {
        if self.store.get(id).is_none() {
            return false;
        }
        self.record_history();
        self.store.remove(id).is_some()
    }

    /// Swaps the annotation with its z-order predecessor.
    pub fn move_annotation_up(&mut self, id: &str) -> bool {
        if !can_swap(&self.store, id, -1) {
            return false;
        }
        self.record_history();
        self.store.move_up(id)
    }

    /// Swaps the annotation with its z-order successor.
    pub fn move_annotation_down(&mut self, id: &str) -> bool {
        if !can_swap(&self.store, id, 1) {
            return false;
        }
        self.record_history();
        self.store.move_down(id)
    }

    // --- History -------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Restores the most recent snapshot (or the empty, uncalibrated
    /// baseline once history is exhausted), discards any construction in
    /// progress, and returns the tool to `Pan`.
    pub fn undo(&mut self) {
        let snapshot = self.history.undo();
        debug!(depth = self.history.depth(), "undo");
        self.store
            .restore(snapshot.annotations, snapshot.meters_per_pixel);
        self.current_points.clear();
        self.calibrator.reset();
        self.suspended_tool = None;
        self.pan_anchor = None;
        self.crop_anchor = None;
        self.tool = ToolMode::Pan;
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            annotations: self.store.annotations().to_vec(),
            meters_per_pixel: self.store.meters_per_pixel(),
        }
    }

    /// Captures the pre-mutation state. Called before every committed
    /// mutation: shape finished, shape deleted, scale set, field edited,
    /// reorder.
    pub(crate) fn record_history(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

fn can_swap(store: &ShapeStore, id: &str, direction: isize) -> bool {
    let Some(index) = store.iter().position(|a| a.id == id) else {
        return false;
    };
    if direction < 0 {
        index > 0
    } else {
        index + 1 < store.len()
    }
}
