//! Shared numeric constants for the whiteboard core.

use std::f64::consts::PI;

// ── Selection ───────────────────────────────────────────────────

/// Distance in world units between an element's bounds and its selection box.
pub const SELECTION_OFFSET: f64 = 10.0;

/// Half-size of the square zone around a handle that counts as grabbing it.
pub const HANDLE_THRESHOLD: f64 = 10.0;

/// Diameter of a drawn selection handle.
pub const CONTROL_POINT_SIZE: f64 = 7.0;

/// Dash pattern for the selection box around text. Other shapes use a solid box.
pub const SELECTION_DASH: [f64; 2] = [4.0, 4.0];

/// Dash pattern for the selection box around freehand strokes.
pub const PENCIL_SELECTION_DASH: [f64; 2] = [1.0, 1.0];

// ── Hit-testing ─────────────────────────────────────────────────

/// Maximum distance from a closed outline (rectangle, ellipse, diamond) that still hits its stroke.
pub const STROKE_TOLERANCE: f64 = 5.0;

/// Allowed slack in `d(p, a) + d(p, b) - d(a, b)` for a point to lie on a line.
pub const LINE_TOLERANCE: f64 = 1.0;

/// Allowed slack in `d(p, a) + d(p, b) - d(a, b)` for a point to lie on an arrow shaft.
pub const ARROW_TOLERANCE: f64 = 0.1;

/// Number of segments used to approximate an ellipse outline.
pub const ELLIPSE_SEGMENTS: usize = 64;

// ── Arrow ───────────────────────────────────────────────────────

/// Arrowhead length in world units.
pub const ARROW_HEAD_LENGTH: f64 = 10.0;

/// Arrowhead half-angle in radians (30°).
pub const ARROW_HEAD_ANGLE: f64 = PI / 6.0;

// ── Text ────────────────────────────────────────────────────────

pub const DEFAULT_FONT_SIZE: f64 = 16.0;
pub const DEFAULT_FONT_FAMILY: &str = "\"Roboto Mono\", monospace";
pub const DEFAULT_FONT_STYLE: &str = "normal";
pub const DEFAULT_FONT_WEIGHT: &str = "normal";

/// Smallest font size a text resize can produce.
pub const MIN_FONT_SIZE: f64 = 1.0;

/// Advance width of one monospace glyph as a fraction of the font size.
pub const MONOSPACE_ADVANCE: f64 = 0.6;

// ── Camera ──────────────────────────────────────────────────────

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 20.0;

/// Scale change per wheel tick or keyboard shortcut.
pub const ZOOM_STEP: f64 = 0.1;

// ── Eraser ──────────────────────────────────────────────────────

/// Radius of the circle sampled around the cursor by the eraser.
pub const ERASER_RADIUS: f64 = 5.0;

/// Number of points sampled evenly around the eraser circle.
pub const ERASER_SAMPLES: usize = 25;

// ── Freehand ────────────────────────────────────────────────────

/// Width of the ribbon produced around a freehand stroke.
pub const STROKE_SIZE: f64 = 10.0;

/// Number of segments used for each rounded stroke cap.
pub const STROKE_CAP_SEGMENTS: usize = 8;

/// Denominators smaller than this are treated as zero.
pub const GEOMETRY_EPSILON: f64 = 1e-9;
