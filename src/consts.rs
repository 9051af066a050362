//! Shared numeric constants for the transform engine.

// ── Arrange ─────────────────────────────────────────────────────

/// Swap classifies two layers as aligned on an axis when their edges differ by
/// less than `span / SWAP_SENSITIVITY` of the pair's shared bounding box.
pub const SWAP_SENSITIVITY: f64 = 10.0;

// ── Nudge ───────────────────────────────────────────────────────

/// Arrow-key nudge distance in pixels.
pub const NUDGE_STEP: f64 = 1.0;

/// Shift + arrow-key nudge distance in pixels.
pub const BIG_NUDGE_STEP: f64 = 10.0;

// ── Rotation ────────────────────────────────────────────────────

/// Angular step applied while the snap modifier is held, in degrees.
pub const ROTATE_SNAP_DEG: f64 = 45.0;

// ── Handles ─────────────────────────────────────────────────────

/// Root font size the overlay handle sizes are expressed against, in pixels.
pub const ROOT_SIZE_PX: f64 = 12.0;

/// Resize anchor hit radius, in root-size units.
pub const ANCHOR_RADIUS_REM: f64 = 0.5;

/// Inner radius of the rotate area around each corner, in root-size units.
pub const ROTATE_INNER_REM: f64 = 0.25;

/// Outer radius of the rotate area around each corner, in root-size units.
pub const ROTATE_OUTER_REM: f64 = 1.0;
