//! Engine-wide constants for the labeling geometry and gesture code.

/// Side length of the square corner handles used to resize a label, in pixels.
pub const RESIZE_SIZE: f64 = 8.0;

/// Minimum pixel width a drawn label must span to be committed.
pub const LABEL_MIN_WIDTH: f64 = 25.0;

/// Minimum pixel height a drawn label must span to be committed.
pub const LABEL_MIN_HEIGHT: f64 = 25.0;

/// Fixed padding added on all four sides of the canvas so labels and
/// handles can be manipulated slightly outside the visible image bounds.
pub const CANVAS_OFFSET: f64 = 40.0;

/// Number of decimal places kept when rounding normalized coordinates.
pub const RATIO_PRECISION: u32 = 4;

/// How far a single-finger touch must travel (in pixels) before it counts
/// as a drag rather than a tap, dismissing an open context menu.
pub const TOUCH_MENU_DISMISS_DISTANCE: f64 = 100.0;

/// Maximum number of simultaneous touch points the engine interprets.
pub const MAX_TOUCH_POINTS: usize = 2;
