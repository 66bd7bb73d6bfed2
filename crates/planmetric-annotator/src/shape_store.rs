//! Ordered committed annotations and the global calibration scalar.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use planmetric_core::units::MeasurementSystem;

use crate::measure::Measurement;
use crate::model::{Annotation, Geometry, GeometryKind};

/// Owns the committed shapes and the single pixels-to-meters scalar.
///
/// The shape order is also display/z-order. The scalar starts at 0.0
/// ("uncalibrated") and is only ever overwritten by a successful
/// calibration submission; deleting the segment that produced it leaves
/// it untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapeStore {
    annotations: Vec<Annotation>,
    meters_per_pixel: f64,
}

/// One row of the derived measurement table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRow {
    pub id: String,
    pub name: String,
    pub kind: GeometryKind,
    pub measurement: String,
    pub notes: String,
    pub color: Option<String>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn meters_per_pixel(&self) -> f64 {
        self.meters_per_pixel
    }

    pub fn set_meters_per_pixel(&mut self, meters_per_pixel: f64) {
        debug!(meters_per_pixel, "scale updated");
        self.meters_per_pixel = meters_per_pixel;
    }

    pub fn is_calibrated(&self) -> bool {
        self.meters_per_pixel > 0.0
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Annotation> {
        self.annotations.iter_mut().find(|a| a.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.annotations.iter().position(|a| a.id == id)
    }

    /// Appends a committed annotation on top of the z-order.
    pub fn add(&mut self, annotation: Annotation) {
        debug!(id = %annotation.id, kind = %annotation.kind(), "annotation committed");
        self.annotations.push(annotation);
    }

    /// Removes by id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Annotation> {
        let index = self.position(id)?;
        Some(self.annotations.remove(index))
    }

    /// Renames an annotation. Empty names are refused: committed shapes
    /// always keep a non-empty display label.
    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            warn!(%id, "refusing empty annotation name");
            return false;
        }
        match self.get_mut(id) {
            Some(annotation) => {
                annotation.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_notes(&mut self, id: &str, notes: &str) -> bool {
        match self.get_mut(id) {
            Some(annotation) => {
                annotation.notes = notes.to_string();
                true
            }
            None => false,
        }
    }

    /// Recolors a polygon. Non-polygon shapes carry no color and are
    /// left untouched.
    pub fn set_color(&mut self, id: &str, color: &str) -> bool {
        match self.get_mut(id) {
            Some(annotation) => match &mut annotation.geometry {
                Geometry::Polygon(region) => {
                    region.color = color.to_string();
                    true
                }
                _ => {
                    warn!(%id, "only polygons carry a color");
                    false
                }
            },
            None => false,
        }
    }

    /// Swaps the annotation with its predecessor in z-order.
    pub fn move_up(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) if index > 0 => {
                self.annotations.swap(index - 1, index);
                true
            }
            _ => false,
        }
    }

    /// Swaps the annotation with its successor in z-order.
    pub fn move_down(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) if index + 1 < self.annotations.len() => {
                self.annotations.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    /// Colors currently in use by committed polygons.
    pub fn polygon_colors(&self) -> Vec<String> {
        self.annotations
            .iter()
            .filter_map(|a| a.color().map(str::to_string))
            .collect()
    }

    /// Replaces the full committed state (undo restore).
    pub fn restore(&mut self, annotations: Vec<Annotation>, meters_per_pixel: f64) {
        self.annotations = annotations;
        self.meters_per_pixel = meters_per_pixel;
    }

    /// Removes everything and resets the scale to uncalibrated.
    pub fn clear(&mut self) {
        self.annotations.clear();
        self.meters_per_pixel = 0.0;
    }

    /// The live measurement of one annotation under the current scale.
    ///
    /// Calibration segments report their stored real-world length;
    /// an inert segment (prompt canceled) reports `Unavailable`.
    pub fn measurement_of(&self, annotation: &Annotation) -> Measurement {
        match &annotation.geometry {
            Geometry::Calibration(segment) => match segment.real_world_length {
                Some(meters) => Measurement::Length(meters),
                None => Measurement::Unavailable,
            },
            Geometry::Polyline(path) => {
                Measurement::from_length_px(path.pixel_length(), self.meters_per_pixel)
            }
            Geometry::Polygon(region) => {
                Measurement::from_area_px(region.pixel_area(), self.meters_per_pixel)
            }
        }
    }

    /// The derived measurement table, recomputed on every read so a
    /// re-calibration is reflected immediately in every row.
    pub fn measurement_table(&self, system: MeasurementSystem) -> Vec<MeasurementRow> {
        self.annotations
            .iter()
            .map(|a| MeasurementRow {
                id: a.id.clone(),
                name: a.name.clone(),
                kind: a.kind(),
                measurement: self.measurement_of(a).format(system),
                notes: a.notes.clone(),
                color: a.color().map(str::to_string),
            })
            .collect()
    }
}
