//! Flat rectangular frames and the box-like "window frame" built from two of them.
//!
//! ```text
//!  TL ______________ TR
//!    |\            /|
//!    | TLi______TRi |
//!    |  |        |  |
//!    | BLi______BRi |
//!    |/____________\|
//!  BL                BR
//! ```

use blueprint_types::{Point3, Quad};
use tracing::{debug, instrument};

use crate::palisade::Palisade;
use crate::types::OpError;

/// Names of the four band quads, in the order returned by [`FrameGeometry::quads`].
pub const FRAME_QUAD_NAMES: [&str; 4] = ["BotQuad", "RightQuad", "TopQuad", "LeftQuad"];

/// Outer and inner corners of a flat rectangular frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeometry {
    /// `[BL, BR, TR, TL]`.
    pub outer: [Point3; 4],
    /// `[BLi, BRi, TRi, TLi]`, each inset by the frame thickness along up and right.
    pub inner: [Point3; 4],
}

impl FrameGeometry {
    /// Derive a frame from its bottom-left corner and two in-plane directions.
    ///
    /// `up` and `right` are normalized; they must be non-zero and not parallel.
    /// The opening must stay open: `2 * thickness` has to be smaller than both
    /// `width` and `height`.
    pub fn new(
        bot_left: Point3,
        width: f64,
        height: f64,
        thickness: f64,
        up: Point3,
        right: Point3,
    ) -> Result<Self, OpError> {
        for (label, value) in [("width", width), ("height", height), ("thickness", thickness)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(OpError::config(format!(
                    "frame {label} must be positive, got {value}"
                )));
            }
        }
        if 2.0 * thickness >= width.min(height) {
            return Err(OpError::config(format!(
                "frame thickness {thickness} closes a {width} x {height} opening"
            )));
        }
        let up = up
            .try_normalize(f64::EPSILON)
            .ok_or_else(|| OpError::config("frame up direction is zero"))?;
        let right = right
            .try_normalize(f64::EPSILON)
            .ok_or_else(|| OpError::config("frame right direction is zero"))?;
        if up.cross(&right).norm() < 1e-9 {
            return Err(OpError::config("frame up and right directions are parallel"));
        }

        let bot_right = bot_left + right * width;
        let top_right = bot_right + up * height;
        let top_left = bot_left + up * height;

        let inner = [
            bot_left + (up + right) * thickness,
            bot_right + (up - right) * thickness,
            top_right + (-up - right) * thickness,
            top_left + (-up + right) * thickness,
        ];

        Ok(Self {
            outer: [bot_left, bot_right, top_right, top_left],
            inner,
        })
    }

    /// The four bands in order bottom, right, top, left.
    ///
    /// Each band is two adjacent outer corners followed by their inner partners
    /// in reverse, so all four share one winding.
    pub fn quads(&self) -> [Quad; 4] {
        let [bl, br, tr, tl] = self.outer;
        let [bli, bri, tri, tli] = self.inner;
        [
            Quad::new(bl, br, bri, bli),
            Quad::new(br, tr, tri, bri),
            Quad::new(tr, tl, tli, tri),
            Quad::new(tl, bl, bli, tli),
        ]
    }
}

/// A frame with depth: back and front frames joined by an outer and an inner
/// palisade, like a window frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame3dGeometry {
    pub back: FrameGeometry,
    pub front: FrameGeometry,
    /// Joins the outer rims of the two frames.
    pub outer_palisade: Palisade,
    /// Joins the inner rims (the reveal of the opening).
    pub inner_palisade: Palisade,
}

impl Frame3dGeometry {
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip(bot_left, up, right, front))]
    pub fn new(
        bot_left: Point3,
        width: f64,
        height: f64,
        frame_width: f64,
        up: Point3,
        right: Point3,
        front: Point3,
        depth: f64,
    ) -> Result<Self, OpError> {
        if !(depth.is_finite() && depth > 0.0) {
            return Err(OpError::config(format!(
                "frame depth must be positive, got {depth}"
            )));
        }
        let front = front
            .try_normalize(f64::EPSILON)
            .ok_or_else(|| OpError::config("frame front direction is zero"))?;
        let extrusion = front * depth;

        let back_frame = FrameGeometry::new(bot_left, width, height, frame_width, up, right)?;
        let front_frame =
            FrameGeometry::new(bot_left + extrusion, width, height, frame_width, up, right)?;
        let outer_palisade = Palisade::extruded(&back_frame.outer, extrusion, true)?;
        let inner_palisade = Palisade::extruded(&back_frame.inner, extrusion, true)?;
        debug!("derived 3d frame");

        Ok(Self {
            back: back_frame,
            front: front_frame,
            outer_palisade,
            inner_palisade,
        })
    }

    /// Pane filling the opening halfway through the frame's depth.
    pub fn pane(&self) -> Quad {
        let mid = self.inner_palisade.mid_loop();
        Quad::new(mid[0], mid[1], mid[2], mid[3])
    }
}
