//! Pure geometry transforms applied to drag snapshots.
//!
//! Translate and resize never touch the live store: they map a frozen
//! snapshot of the selection to a new set of rectangles. The gesture layer
//! uses them both for live previews (no minimum-size enforcement) and for
//! the final commit (clamped).

use crate::coords::CanvasSize;
use crate::model::{Direction, Label};

/// Shift every label by a normalized delta.
///
/// Positions are clamped so the whole rectangle stays inside `[0, 1]` on
/// both axes; width and height are untouched. A zero delta is the identity.
pub fn translate(labels: &[Label], delta: (f64, f64)) -> Vec<Label> {
    labels
        .iter()
        .map(|label| {
            // Clamp range depends on the sign of w/h: the extent, not the
            // stored corner, must stay inside the unit square.
            let (min_x, max_x) = if label.w >= 0.0 {
                (0.0, 1.0 - label.w)
            } else {
                (-label.w, 1.0)
            };
            let (min_y, max_y) = if label.h >= 0.0 {
                (0.0, 1.0 - label.h)
            } else {
                (-label.h, 1.0)
            };
            Label {
                x: (label.x + delta.0).clamp(min_x, max_x),
                y: (label.y + delta.1).clamp(min_y, max_y),
                ..label.clone()
            }
        })
        .collect()
}

/// Resize every label by a normalized delta applied to one corner handle.
///
/// The corner opposite `direction` stays fixed. Rectangles that invert are
/// folded back to positive extent, then clamped to the unit square. When
/// `commit` is true the minimum label size is enforced by clamping towards
/// the fixed corner; during previews transient undersized rectangles are
/// allowed for visual feedback.
pub fn resize(
    labels: &[Label],
    delta: (f64, f64),
    direction: Direction,
    canvas: CanvasSize,
    offset: f64,
    min_width: f64,
    min_height: f64,
    commit: bool,
) -> Vec<Label> {
    let inner_w = canvas.inner_width(offset);
    let inner_h = canvas.inner_height(offset);

    labels
        .iter()
        .map(|label| {
            // Corner semantics assume a positive extent; normalize labels
            // that were drawn in a reverse direction first.
            let (bx0, by0, bx1, by1) = label.bounds();
            let (mut x, mut y) = (bx0, by0);
            let (mut w, mut h) = (bx1 - bx0, by1 - by0);

            if direction.is_left() {
                x += delta.0;
                w -= delta.0;
            } else {
                w += delta.0;
            }
            if direction.is_top() {
                y += delta.1;
                h -= delta.1;
            } else {
                h += delta.1;
            }

            // Dragging past the fixed corner inverts the rectangle; fold it
            // back so the stored form stays positive-extent.
            if w < 0.0 {
                w = w.abs();
                x -= w;
            }
            if h < 0.0 {
                h = h.abs();
                y -= h;
            }

            // Boundary clamp to the unit square.
            if x < 0.0 {
                x = 0.0;
            }
            if y < 0.0 {
                y = 0.0;
            }
            if x + w > 1.0 {
                w = 1.0 - x;
            }
            if y + h > 1.0 {
                h = 1.0 - y;
            }

            if commit {
                // Undersized results are pushed back over the threshold
                // rather than rejected; the extra margin keeps the handles
                // grabbable after the commit.
                if w * inner_w < min_width {
                    w = (3.0 + min_width) / inner_w;
                }
                if h * inner_h < min_height {
                    h = (3.0 + min_height) / inner_h;
                }
            }

            Label {
                x,
                y,
                w,
                h,
                ..label.clone()
            }
        })
        .collect()
}
