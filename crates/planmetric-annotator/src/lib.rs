//! # Planmetric Annotator
//!
//! This crate provides the calibrated measurement and annotation engine
//! for floor-plan and aerial imagery. A host application feeds it
//! pointer, wheel, and hotkey events in device coordinates and renders
//! from its state; the engine owns the shapes, the calibration scale,
//! the measurement math, tool modes, and undo.
//!
//! ## Core Components
//!
//! ### Geometry and State
//! - **Model**: tagged-union shapes — calibration segments, polylines,
//!   polygons — all in image space
//! - **Viewport**: device↔image transform with pan and pointer-anchored
//!   zoom
//! - **ShapeStore**: committed shapes (order is z-order) plus the single
//!   `meters_per_pixel` scalar
//! - **Measure**: pure geometry (distance, polyline length, shoelace
//!   area) and live unit formatting
//!
//! ### Interaction
//! - **Workbench**: the single state object driven by host events; tool
//!   modes, temporary pan, shape-in-progress lifecycle, crop scratch
//!   selection
//! - **Calibration**: two-click reference workflow deriving the scale
//! - **History**: bounded pre-mutation snapshots, undo only
//!
//! ## Architecture
//!
//! ```text
//! Workbench (host events in, state out)
//!   ├── Viewport (device↔image)
//!   ├── ShapeStore (annotations + scale)
//!   │     └── Measure (derived lengths/areas)
//!   ├── Calibrator (two-click workflow)
//!   └── SnapshotHistory (undo)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use planmetric_annotator::{ToolMode, Workbench};
//!
//! let mut workbench = Workbench::new(1280.0, 720.0);
//! workbench.set_tool(ToolMode::Polyline);
//! workbench.pointer_pressed(100.0, 100.0);
//! workbench.pointer_pressed(300.0, 100.0);
//! workbench.finish_current();
//! assert_eq!(workbench.annotations().len(), 1);
//! ```

pub mod calibration;
pub mod config;
pub mod history;
pub mod measure;
pub mod model;
pub mod palette;
pub mod shape_store;
pub mod viewport;
pub mod workbench;

pub use calibration::{CalibrationOutcome, CalibrationRequest, Calibrator};
pub use config::WorkbenchSettings;
pub use history::{Snapshot, SnapshotHistory};
pub use measure::{distance, polygon_area_px, polyline_length_px, Measurement};
pub use model::{
    Annotation, CalibrationSegment, Geometry, GeometryKind, PlanShape, Point, PolygonRegion,
    PolylinePath,
};
pub use palette::PALETTE;
pub use shape_store::{MeasurementRow, ShapeStore};
pub use viewport::Viewport;
pub use workbench::{CropRect, HotKey, ToolMode, Workbench};

// Re-export the core foundation so hosts depend on one crate.
pub use planmetric_core::error::{CalibrationError, Error, Result, UnitsError};
pub use planmetric_core::units::{LengthUnit, MeasurementSystem};
