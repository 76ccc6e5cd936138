//! Hollow-box decomposition into six wall cuboids.
//!
//! Every pair of opposing walls either spans the full outer extent along a
//! transverse axis or is inset by the wall thickness on both ends. Which one is
//! decided by the (big, small) side pairing:
//!
//! - the big pair spans the full footprint in both transverse directions,
//! - the small pair is inset in both transverse directions,
//! - the remaining pair spans fully along the small pair's axis only.
//!
//! With that policy each edge region of the shell is covered by exactly one
//! wall, so the six walls tile the shell without gaps or overlaps.

use blueprint_types::{snap, IntervalBox, Side};
use tracing::{debug, info, instrument};

use crate::types::OpError;

/// The six walls of a hollow box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxWalls {
    pub bottom: IntervalBox,
    pub top: IntervalBox,
    pub left: IntervalBox,
    pub right: IntervalBox,
    pub back: IntervalBox,
    pub front: IntervalBox,
}

impl BoxWalls {
    /// Walls with their conventional part names: bottom, left, right, top, back, front.
    pub fn named(&self) -> [(&'static str, IntervalBox); 6] {
        [
            ("botpart", self.bottom),
            ("leftpart", self.left),
            ("rightpart", self.right),
            ("toppart", self.top),
            ("backpart", self.back),
            ("frontpart", self.front),
        ]
    }

    /// The (lower, upper) walls perpendicular to `side`.
    pub fn pair(&self, side: Side) -> (IntervalBox, IntervalBox) {
        match side {
            Side::BottomTop => (self.bottom, self.top),
            Side::LeftRight => (self.left, self.right),
            Side::BackFront => (self.back, self.front),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = IntervalBox> {
        self.named().into_iter().map(|(_, b)| b)
    }

    pub fn total_volume(&self) -> f64 {
        self.iter().map(|b| b.volume()).sum()
    }
}

/// Validated (big, small) side pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxDecomposer {
    big: Side,
    small: Side,
}

impl BoxDecomposer {
    /// Fails with `InvalidConfiguration` when `big == small`.
    pub fn new(big: Side, small: Side) -> Result<Self, OpError> {
        if big == small {
            return Err(OpError::config(format!(
                "big side and small side must differ (both {big:?})"
            )));
        }
        Ok(Self { big, small })
    }

    pub fn big(&self) -> Side {
        self.big
    }

    pub fn small(&self) -> Side {
        self.small
    }

    /// Whether the walls perpendicular to `walls` span the full outer extent
    /// along the axis of `across`.
    ///
    /// True iff `walls` is the big pair, or the big pair is the third pair and
    /// `across` is the small pair.
    pub fn spans_full(&self, walls: Side, across: Side) -> bool {
        if walls == across {
            return true;
        }
        walls == self.big || (walls.third(across) == Some(self.big) && across == self.small)
    }

    /// Split `outer` into six walls of the given thickness.
    ///
    /// `thickness` is snapped to the outer box's quantum once; every wall face
    /// and inset is then derived from the outer faces and that snapped value, so
    /// neighbouring walls share bit-identical faces. Each wall sits on its own
    /// outer face and is trimmed on the transverse edges it does not own.
    #[instrument(skip(self, outer), fields(big = ?self.big, small = ?self.small))]
    pub fn decompose(&self, outer: &IntervalBox, thickness: f64) -> Result<BoxWalls, OpError> {
        let thickness = validate_thickness(outer, thickness)?;

        let (bottom, top) = self.wall_pair(outer, Side::BottomTop, thickness);
        let (left, right) = self.wall_pair(outer, Side::LeftRight, thickness);
        let (back, front) = self.wall_pair(outer, Side::BackFront, thickness);

        info!(
            width = outer.width(),
            height = outer.height(),
            depth = outer.depth(),
            thickness,
            "decomposed hollow box"
        );
        Ok(BoxWalls {
            bottom,
            top,
            left,
            right,
            back,
            front,
        })
    }

    fn wall_pair(
        &self,
        outer: &IntervalBox,
        walls: Side,
        thickness: f64,
    ) -> (IntervalBox, IntervalBox) {
        let mut slab = *outer;
        for across in Side::ALL.into_iter().filter(|s| *s != walls) {
            if !self.spans_full(walls, across) {
                slab.set_lower(across, outer.lower(across) + thickness);
                slab.set_upper(across, outer.upper(across) - thickness);
            }
        }

        let mut lower = slab;
        lower.set_upper(walls, outer.lower(walls) + thickness);
        let mut upper = slab;
        upper.set_lower(walls, outer.upper(walls) - thickness);
        debug!(?walls, %lower, %upper, "wall pair");
        (lower, upper)
    }
}

/// Slack when checking that two walls fit, so `2t == extent` is not lost to rounding.
const FIT_TOLERANCE: f64 = 1e-12;

/// Check `thickness` and return it snapped to the outer box's quantum.
fn validate_thickness(outer: &IntervalBox, thickness: f64) -> Result<f64, OpError> {
    if !(thickness.is_finite() && thickness > 0.0) {
        return Err(OpError::config(format!(
            "wall thickness must be positive, got {thickness}"
        )));
    }
    let snapped = snap(thickness, outer.quantum());
    if snapped <= 0.0 {
        return Err(OpError::config(format!(
            "wall thickness {thickness} rounds to zero at quantum {}",
            outer.quantum()
        )));
    }
    for side in Side::ALL {
        let extent = outer.extent(side);
        if 2.0 * snapped > extent + FIT_TOLERANCE {
            return Err(OpError::config(format!(
                "two walls of thickness {thickness} do not fit into extent {extent} along {side:?}"
            )));
        }
    }
    Ok(snapped)
}

/// One-shot form of [`BoxDecomposer::decompose`].
pub fn decompose_box(
    outer: &IntervalBox,
    thickness: f64,
    big: Side,
    small: Side,
) -> Result<BoxWalls, OpError> {
    BoxDecomposer::new(big, small)?.decompose(outer, thickness)
}
