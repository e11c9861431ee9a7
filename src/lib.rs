//! Labelisator - bounding-box labeling engine
//!
//! A UI-framework-independent geometry and gesture engine for annotating
//! images with rectangle labels. Hosts feed it pointer/touch events and
//! react to the events it emits; rendering, transport and persistence stay
//! outside.

mod config;
mod constants;
mod coords;
mod engine;
mod error;
mod event;
mod model;
mod store;
mod transform;

pub use config::EngineConfig;
pub use constants::{
    CANVAS_OFFSET, LABEL_MIN_HEIGHT, LABEL_MIN_WIDTH, MAX_TOUCH_POINTS, RATIO_PRECISION,
    RESIZE_SIZE, TOUCH_MENU_DISMISS_DISTANCE,
};
pub use coords::{
    CanvasSize, NormalizedRect, PixelRect, Point, normalized_delta, point_is_outside, round_ratio,
    span_below_minimum, to_normalized, to_pixel,
};
pub use engine::{GestureState, ImageId, LabelingEngine};
pub use error::EngineError;
pub use event::{CursorIcon, DrawPreview, EngineEvent, EngineWarning, VisualState};
pub use hit_test::{
    HitTarget, cursor_at, hovered_ids, labels_under_point, resize_handle_under_point,
    smallest_label_under_point,
};
pub use model::{Category, CategoryId, Direction, Label, LabelId, Tool};
pub use store::LabelStore;
pub use transform::{resize, translate};
