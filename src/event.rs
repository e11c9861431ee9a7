//! Events emitted by the engine and the visual state exposed to renderers.
//!
//! The engine never calls its collaborators directly: every input method
//! returns the events the host should act on (persist the label set, show
//! a warning, update the cursor). This keeps the core free of UI and
//! transport concerns.

use crate::coords::Point;
use crate::model::{Label, LabelId, Tool};

/// Events the host application reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A gesture committed; persist the full, current label set for the
    /// image. Fired optimistically: the in-memory store is already updated
    /// and is not rolled back if the save fails.
    SaveRequested(Vec<Label>),
    /// Advisory request to switch the active tool (auto-switch hover).
    /// The host may ignore it.
    ToolChangeRequested(Tool),
    /// The cursor affordance changed.
    CursorChanged(CursorIcon),
    /// A context menu should open at this screen-space point.
    MenuOpened {
        /// Screen-space position for the menu overlay.
        at: Point,
    },
    /// The context menu should close.
    MenuClosed,
    /// A user-facing transient warning.
    Warning(EngineWarning),
}

/// User-facing warnings; everything else the engine swallows as expected
/// pointer noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineWarning {
    /// More than two simultaneous touch points.
    TooManyTouchPoints {
        /// Number of touch points observed.
        count: usize,
    },
}

/// Cursor affordances a renderer can map to platform cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    /// Drawing crosshair (label tool over the image).
    Crosshair,
    /// Translate affordance (move tool over a label body).
    Move,
    /// Resize along the NW-SE diagonal (top-left / bottom-right handles).
    ResizeNwse,
    /// Resize along the NE-SW diagonal (top-right / bottom-left handles).
    ResizeNesw,
}

/// Live preview rectangle for an in-progress draw gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPreview {
    /// Drag anchor corner, pixel space.
    pub anchor: Point,
    /// Current drag corner, pixel space.
    pub current: Point,
    /// Whether releasing now would produce a label (span over the minimum
    /// size on both axes). Renderers color the rubber band by this.
    pub meets_minimum: bool,
}

/// Everything a rendering adapter needs to draw the transient layer on top
/// of the committed labels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualState {
    /// Current cursor affordance.
    pub cursor: CursorIcon,
    /// Crosshair guide position (label tool hovering inside the canvas).
    pub cursor_guides: Option<Point>,
    /// Rubber-band rectangle of an in-progress draw.
    pub draw_preview: Option<DrawPreview>,
    /// Detached selection, already transformed by the drag in progress.
    /// Rendered as a floating preview; these labels are absent from the
    /// store until the gesture commits.
    pub floating: Vec<Label>,
    /// Labels currently hovered while idle.
    pub hovered: Vec<LabelId>,
    /// Screen-space position of the open context menu, if any.
    pub menu: Option<Point>,
}
