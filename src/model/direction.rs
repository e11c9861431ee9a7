//! Resize handle directions.

use serde::{Deserialize, Serialize};

/// Identifies which corner handle a resize gesture grabbed.
///
/// "Translate, not resize" is represented as `Option<Direction>::None` at
/// the call sites that distinguish the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Direction {
    /// All directions in hit-test priority order.
    pub fn all() -> &'static [Direction] {
        &[
            Direction::TopLeft,
            Direction::TopRight,
            Direction::BottomLeft,
            Direction::BottomRight,
        ]
    }

    /// Whether the handle lies on the top edge.
    pub fn is_top(&self) -> bool {
        matches!(self, Direction::TopLeft | Direction::TopRight)
    }

    /// Whether the handle lies on the left edge.
    pub fn is_left(&self) -> bool {
        matches!(self, Direction::TopLeft | Direction::BottomLeft)
    }

    /// Whether a drag on this handle moves along the NW-SE diagonal
    /// (used for the cursor affordance; the other pair is NE-SW).
    pub fn is_nwse(&self) -> bool {
        matches!(self, Direction::TopLeft | Direction::BottomRight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&Direction::TopLeft).unwrap();
        assert_eq!(json, "\"top-left\"");
        let back: Direction = serde_json::from_str("\"bottom-right\"").unwrap();
        assert_eq!(back, Direction::BottomRight);
    }

    #[test]
    fn test_diagonals() {
        assert!(Direction::TopLeft.is_nwse());
        assert!(Direction::BottomRight.is_nwse());
        assert!(!Direction::TopRight.is_nwse());
        assert!(!Direction::BottomLeft.is_nwse());
    }
}
