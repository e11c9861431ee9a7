//! Data model for the labeling engine.
//!
//! - [`Label`]: a normalized-coordinate rectangle annotation
//! - [`Category`]: the external category entity labels reference
//! - [`Direction`]: which corner handle a resize gesture is anchored to
//! - [`Tool`]: the active annotation tool mode

mod category;
mod direction;
mod label;
mod tool;

pub use category::{Category, CategoryId};
pub use direction::Direction;
pub use label::{Label, LabelId};
pub use tool::Tool;
