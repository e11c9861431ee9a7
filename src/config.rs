//! Engine configuration.
//!
//! All geometry thresholds default to the crate constants; hosts can
//! serialize a config alongside their own settings to tune them.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Tunable parameters for the labeling engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Padding in pixels around the image on all four sides.
    #[serde(default = "default_canvas_offset")]
    pub canvas_offset: f64,

    /// Minimum pixel width for a committed label.
    #[serde(default = "default_min_label_width")]
    pub min_label_width: f64,

    /// Minimum pixel height for a committed label.
    #[serde(default = "default_min_label_height")]
    pub min_label_height: f64,

    /// Side length of the square corner resize handles, in pixels.
    #[serde(default = "default_resize_handle_size")]
    pub resize_handle_size: f64,

    /// Pixel distance a single-finger touch must travel before it counts as
    /// a drag and dismisses an open context menu.
    #[serde(default = "default_touch_menu_dismiss_distance")]
    pub touch_menu_dismiss_distance: f64,

    /// When enabled, idle hover emits advisory tool-change requests:
    /// hovering a label in draw mode suggests switching to move, hovering
    /// empty space in move mode suggests switching back. The engine never
    /// switches on its own.
    #[serde(default)]
    pub auto_switch: bool,
}

fn default_canvas_offset() -> f64 {
    constants::CANVAS_OFFSET
}

fn default_min_label_width() -> f64 {
    constants::LABEL_MIN_WIDTH
}

fn default_min_label_height() -> f64 {
    constants::LABEL_MIN_HEIGHT
}

fn default_resize_handle_size() -> f64 {
    constants::RESIZE_SIZE
}

fn default_touch_menu_dismiss_distance() -> f64 {
    constants::TOUCH_MENU_DISMISS_DISTANCE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_offset: default_canvas_offset(),
            min_label_width: default_min_label_width(),
            min_label_height: default_min_label_height(),
            resize_handle_size: default_resize_handle_size(),
            touch_menu_dismiss_distance: default_touch_menu_dismiss_distance(),
            auto_switch: false,
        }
    }
}
