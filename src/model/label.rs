//! Rectangle label type stored in normalized unit space.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CategoryId;

/// Unique identifier for a label, generated client-side at creation.
pub type LabelId = Uuid;

/// A rectangle annotation in normalized unit space, relative to the image
/// it annotates.
///
/// `x`/`y` is the top-left corner as a fraction of image width/height.
/// `w`/`h` are signed fractions: the sign records the original drag
/// direction, the magnitude is the geometric size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Unique identifier, stable across the label's lifetime.
    pub id: LabelId,
    /// Top-left corner X, in `[0, 1]`.
    pub x: f64,
    /// Top-left corner Y, in `[0, 1]`.
    pub y: f64,
    /// Signed width as a fraction of image width.
    pub w: f64,
    /// Signed height as a fraction of image height.
    pub h: f64,
    /// Category this label belongs to, if any.
    pub category_id: Option<CategoryId>,
}

impl Label {
    /// Create a new label with a freshly generated ID.
    pub fn new(x: f64, y: f64, w: f64, h: f64, category_id: Option<CategoryId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            w,
            h,
            category_id,
        }
    }

    /// Sign-normalized extent `(min_x, min_y, max_x, max_y)` in unit space.
    ///
    /// Labels drawn right-to-left or bottom-to-top carry negative `w`/`h`;
    /// geometric queries always work on the normalized extent.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (x0, x1) = if self.w >= 0.0 {
            (self.x, self.x + self.w)
        } else {
            (self.x + self.w, self.x)
        };
        let (y0, y1) = if self.h >= 0.0 {
            (self.y, self.y + self.h)
        } else {
            (self.y + self.h, self.y)
        };
        (x0, y0, x1, y1)
    }

    /// Absolute area in unit space.
    pub fn area(&self) -> f64 {
        (self.w * self.h).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_positive_extent() {
        let label = Label::new(0.1, 0.2, 0.3, 0.4, None);
        assert_eq!(label.bounds(), (0.1, 0.2, 0.4, 0.6000000000000001));
    }

    #[test]
    fn test_bounds_negative_extent() {
        // Drawn from bottom-right to top-left: top-left stored corner is the
        // drag anchor, w/h are negative.
        let label = Label::new(0.5, 0.5, -0.2, -0.3, None);
        let (x0, y0, x1, y1) = label.bounds();
        assert!((x0 - 0.3).abs() < 1e-9);
        assert!((y0 - 0.2).abs() < 1e-9);
        assert!((x1 - 0.5).abs() < 1e-9);
        assert!((y1 - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_area_ignores_sign() {
        let a = Label::new(0.0, 0.0, 0.2, 0.2, None);
        let b = Label::new(0.2, 0.2, -0.2, -0.2, None);
        assert!((a.area() - b.area()).abs() < 1e-12);
    }

    #[test]
    fn test_unique_ids() {
        let a = Label::new(0.0, 0.0, 0.1, 0.1, None);
        let b = Label::new(0.0, 0.0, 0.1, 0.1, None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serde_field_names() {
        let label = Label::new(0.1, 0.2, 0.3, 0.4, Some(7));
        let json = serde_json::to_string(&label).unwrap();
        assert!(json.contains("\"category_id\":7"));
        assert!(json.contains("\"w\":0.3"));
        let back: Label = serde_json::from_str(&json).unwrap();
        assert_eq!(back, label);
    }
}
