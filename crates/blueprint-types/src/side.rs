use serde::{Deserialize, Serialize};

/// One of the three pairs of opposing box faces.
///
/// Used by hollow-box decomposition to choose which pair of walls is "big"
/// (spans the full outer footprint) and which is "small" (inset on both ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Bottom and top, perpendicular to z.
    BottomTop,
    /// Left and right, perpendicular to y.
    LeftRight,
    /// Back and front, perpendicular to x.
    BackFront,
}

impl Side {
    pub const ALL: [Side; 3] = [Side::BottomTop, Side::LeftRight, Side::BackFront];

    /// The pair that is neither `self` nor `other`.
    ///
    /// Returns `None` when both are the same pair.
    pub fn third(self, other: Side) -> Option<Side> {
        if self == other {
            return None;
        }
        Side::ALL.into_iter().find(|s| *s != self && *s != other)
    }

    /// Index of the axis this pair is perpendicular to (x = 0, y = 1, z = 2).
    pub fn axis(self) -> usize {
        match self {
            Side::BackFront => 0,
            Side::LeftRight => 1,
            Side::BottomTop => 2,
        }
    }
}
