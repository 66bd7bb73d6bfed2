//! Engine settings.

use serde::{Deserialize, Serialize};

use planmetric_core::constants::{CLOSE_THRESHOLD_PX, HISTORY_CAPACITY};
use planmetric_core::units::MeasurementSystem;

/// Tunable workbench behavior. Hosts typically persist this next to
/// their own preferences and hand it back on startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchSettings {
    /// Active display and entry unit system.
    pub units: MeasurementSystem,
    /// Device-pixel radius for polygon auto-close.
    pub close_threshold_px: f64,
    /// Retained undo snapshots.
    pub history_capacity: usize,
}

impl Default for WorkbenchSettings {
    fn default() -> Self {
        Self {
            units: MeasurementSystem::default(),
            close_threshold_px: CLOSE_THRESHOLD_PX,
            history_capacity: HISTORY_CAPACITY,
        }
    }
}
