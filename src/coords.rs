//! Coordinate model: conversion between pixel space and normalized unit space.
//!
//! Labels are stored as fractions of the image size; the canvas the user
//! interacts with is the image plus a fixed padding offset on all four
//! sides. Every conversion therefore works against the "inner" canvas size
//! (canvas minus twice the offset).

use serde::{Deserialize, Serialize};

use crate::constants::RATIO_PRECISION;
use crate::model::Label;

/// A 2D point in pixel space, canvas-relative and offset-inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Canvas dimensions in pixels, including the offset margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Usable width once the offset margin is subtracted from both sides.
    pub fn inner_width(&self, offset: f64) -> f64 {
        self.width - 2.0 * offset
    }

    /// Usable height once the offset margin is subtracted from both sides.
    pub fn inner_height(&self, offset: f64) -> f64 {
        self.height - 2.0 * offset
    }
}

/// A rectangle in normalized unit space, before it becomes a [`Label`].
///
/// `w`/`h` keep the sign of the drag that produced them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A label's rectangle converted back to pixel space (offset-inclusive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PixelRect {
    /// The four corner points, in top-left, top-right, bottom-left,
    /// bottom-right order of the stored (possibly sign-flipped) rectangle.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.w, self.y),
            Point::new(self.x, self.y + self.h),
            Point::new(self.x + self.w, self.y + self.h),
        ]
    }

    /// Sign-normalized extent `(min_x, min_y, max_x, max_y)`.
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

    /// Whether a point lies inside the rectangle, edges inclusive.
    /// Handles negative widths/heights.
    pub fn contains(&self, point: Point) -> bool {
        let (x0, y0, x1, y1) = self.bounds();
        point.x >= x0 && point.x <= x1 && point.y >= y0 && point.y <= y1
    }

    /// Absolute area in square pixels.
    pub fn area(&self) -> f64 {
        (self.w * self.h).abs()
    }
}

/// Round a normalized ratio to [`RATIO_PRECISION`] decimal places, keeping
/// its sign. Keeps stored label geometry stable and diff-friendly.
pub fn round_ratio(value: f64) -> f64 {
    let factor = 10f64.powi(RATIO_PRECISION as i32);
    (value * factor).round() / factor
}

/// Convert two pixel corners (drag anchor and current point) into a
/// normalized rectangle.
///
/// The stored corner is the top-left of the normalized extent; `w`/`h` keep
/// the drag direction as their sign (`current - anchor`).
pub fn to_normalized(
    anchor: Point,
    current: Point,
    canvas: CanvasSize,
    offset: f64,
) -> NormalizedRect {
    let iw = canvas.inner_width(offset);
    let ih = canvas.inner_height(offset);
    NormalizedRect {
        x: round_ratio((anchor.x.min(current.x) - offset) / iw),
        y: round_ratio((anchor.y.min(current.y) - offset) / ih),
        w: round_ratio((current.x - anchor.x) / iw),
        h: round_ratio((current.y - anchor.y) / ih),
    }
}

/// Convert a label's normalized rectangle back to pixel space.
pub fn to_pixel(label: &Label, canvas: CanvasSize, offset: f64) -> PixelRect {
    let iw = canvas.inner_width(offset);
    let ih = canvas.inner_height(offset);
    PixelRect {
        x: offset + label.x * iw,
        y: offset + label.y * ih,
        w: label.w * iw,
        h: label.h * ih,
    }
}

/// Whether a pixel point falls outside the image area, i.e. inside the
/// offset margin or beyond the canvas.
pub fn point_is_outside(canvas: CanvasSize, point: Point, offset: f64) -> bool {
    point.x < offset
        || point.x > canvas.width - offset
        || point.y < offset
        || point.y > canvas.height - offset
}

/// Normalized delta between two pixel points (`a - b`, as fractions of the
/// inner canvas size).
pub fn normalized_delta(canvas: CanvasSize, a: Point, b: Point, offset: f64) -> (f64, f64) {
    (
        (a.x - b.x) / canvas.inner_width(offset),
        (a.y - b.y) / canvas.inner_height(offset),
    )
}

/// Whether the pixel span between two points is below the minimum label
/// size on either axis. Used to reject accidental micro-labels.
pub fn span_below_minimum(a: Point, b: Point, min_width: f64, min_height: f64) -> bool {
    (a.x - b.x).abs() < min_width || (a.y - b.y).abs() < min_height
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_round_ratio_keeps_sign() {
        assert!(approx_eq(round_ratio(0.123456), 0.1235));
        assert!(approx_eq(round_ratio(-0.123456), -0.1235));
        assert!(approx_eq(round_ratio(0.5), 0.5));
    }

    #[test]
    fn test_to_normalized_draw_scenario() {
        // 700x500 canvas with a 10 px offset: the inner area is 680x480.
        let canvas = CanvasSize::new(700.0, 500.0);
        let rect = to_normalized(
            Point::new(50.0, 50.0),
            Point::new(150.0, 150.0),
            canvas,
            10.0,
        );
        assert!(approx_eq(rect.x, round_ratio(40.0 / 680.0))); // 0.0588
        assert!(approx_eq(rect.y, round_ratio(40.0 / 480.0))); // 0.0833
        assert!(approx_eq(rect.w, round_ratio(100.0 / 680.0))); // 0.1471
        assert!(approx_eq(rect.h, round_ratio(100.0 / 480.0))); // 0.2083
    }

    #[test]
    fn test_to_normalized_reverse_drag_keeps_sign() {
        let canvas = CanvasSize::new(700.0, 500.0);
        let rect = to_normalized(
            Point::new(150.0, 150.0),
            Point::new(50.0, 50.0),
            canvas,
            10.0,
        );
        // Same top-left corner, negative span.
        assert!(approx_eq(rect.x, round_ratio(40.0 / 680.0)));
        assert!(rect.w < 0.0);
        assert!(rect.h < 0.0);
        assert!(approx_eq(rect.w, round_ratio(-100.0 / 680.0)));
    }

    #[test]
    fn test_pixel_round_trip() {
        let canvas = CanvasSize::new(700.0, 500.0);
        let offset = 40.0;
        let label = Label::new(0.1, 0.2, 0.3, 0.4, None);
        let px = to_pixel(&label, canvas, offset);
        let anchor = Point::new(px.x, px.y);
        let current = Point::new(px.x + px.w, px.y + px.h);
        let back = to_normalized(anchor, current, canvas, offset);
        // Within rounding tolerance of RATIO_PRECISION.
        assert!((back.x - label.x).abs() < 1e-4);
        assert!((back.y - label.y).abs() < 1e-4);
        assert!((back.w - label.w).abs() < 1e-4);
        assert!((back.h - label.h).abs() < 1e-4);
    }

    #[test]
    fn test_pixel_rect_contains_negative_extent() {
        let rect = PixelRect {
            x: 200.0,
            y: 200.0,
            w: -100.0,
            h: -100.0,
        };
        assert!(rect.contains(Point::new(150.0, 150.0)));
        assert!(rect.contains(Point::new(100.0, 100.0))); // edge inclusive
        assert!(!rect.contains(Point::new(250.0, 150.0)));
    }

    #[test]
    fn test_point_is_outside_offset_margin() {
        let canvas = CanvasSize::new(700.0, 500.0);
        assert!(point_is_outside(canvas, Point::new(5.0, 100.0), 10.0));
        assert!(point_is_outside(canvas, Point::new(695.0, 100.0), 10.0));
        assert!(point_is_outside(canvas, Point::new(100.0, 495.0), 10.0));
        assert!(!point_is_outside(canvas, Point::new(350.0, 250.0), 10.0));
        // The margin boundary itself is inside.
        assert!(!point_is_outside(canvas, Point::new(10.0, 10.0), 10.0));
    }

    #[test]
    fn test_normalized_delta() {
        let canvas = CanvasSize::new(800.0, 600.0);
        let (dx, dy) = normalized_delta(
            canvas,
            Point::new(120.0, 130.0),
            Point::new(100.0, 100.0),
            0.0,
        );
        assert!(approx_eq(dx, 20.0 / 800.0));
        assert!(approx_eq(dy, 30.0 / 600.0));
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!(approx_eq(a.distance_to(b), 5.0));
    }

    #[test]
    fn test_span_below_minimum() {
        let a = Point::new(50.0, 50.0);
        assert!(span_below_minimum(a, Point::new(52.0, 52.0), 10.0, 10.0));
        assert!(span_below_minimum(a, Point::new(80.0, 55.0), 10.0, 10.0));
        assert!(!span_below_minimum(a, Point::new(80.0, 80.0), 10.0, 10.0));
    }
}
