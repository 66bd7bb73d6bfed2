//! Engine-wide tuning constants.

/// Smallest allowed viewport scale.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed viewport scale.
pub const MAX_ZOOM: f64 = 5.0;

/// Multiplicative factor applied per discrete zoom step.
pub const ZOOM_STEP: f64 = 1.2;

/// Fraction of the surface reserved as padding per edge when fitting an
/// image into the viewport.
pub const FIT_PADDING: f64 = 0.05;

/// Device-pixel radius within which a polygon click snaps to the first
/// vertex and closes the ring. Divided by the current scale to get the
/// image-space threshold.
pub const CLOSE_THRESHOLD_PX: f64 = 20.0;

/// Maximum retained undo snapshots.
pub const HISTORY_CAPACITY: usize = 50;

/// Meters per foot.
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Meters per inch.
pub const METERS_PER_INCH: f64 = 0.0254;

/// Feet per meter.
pub const FEET_PER_METER: f64 = 3.28084;

/// Square feet per square meter.
pub const SQUARE_FEET_PER_SQUARE_METER: f64 = 10.7639;
