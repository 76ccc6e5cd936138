use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rounding::{snap, DEFAULT_QUANTUM};
use crate::side::Side;
use crate::Point3;

/// One of the eight corners of an [`IntervalBox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    BackLeftBottom,
    BackLeftTop,
    BackRightBottom,
    BackRightTop,
    FrontLeftBottom,
    FrontLeftTop,
    FrontRightBottom,
    FrontRightTop,
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::BackLeftBottom,
        Corner::BackLeftTop,
        Corner::BackRightBottom,
        Corner::BackRightTop,
        Corner::FrontLeftBottom,
        Corner::FrontLeftTop,
        Corner::FrontRightBottom,
        Corner::FrontRightTop,
    ];

    pub fn is_front(self) -> bool {
        matches!(
            self,
            Corner::FrontLeftBottom
                | Corner::FrontLeftTop
                | Corner::FrontRightBottom
                | Corner::FrontRightTop
        )
    }

    pub fn is_right(self) -> bool {
        matches!(
            self,
            Corner::BackRightBottom
                | Corner::BackRightTop
                | Corner::FrontRightBottom
                | Corner::FrontRightTop
        )
    }

    pub fn is_top(self) -> bool {
        matches!(
            self,
            Corner::BackLeftTop | Corner::BackRightTop | Corner::FrontLeftTop | Corner::FrontRightTop
        )
    }
}

/// Axis-aligned box stored as three coordinate pairs.
///
/// - x: `back..front`
/// - y: `left..right`
/// - z: `bottom..top`
///
/// Every bound is snapped to `quantum` whenever it is written, so boxes derived
/// from each other by the same arithmetic share bit-identical faces. Inverted
/// ranges (`left > right`) are stored as given; nothing here rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalBox {
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
    back: f64,
    front: f64,
    #[serde(default = "default_quantum")]
    quantum: f64,
}

fn default_quantum() -> f64 {
    DEFAULT_QUANTUM
}

impl IntervalBox {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64, back: f64, front: f64) -> Self {
        Self::with_quantum(left, right, bottom, top, back, front, DEFAULT_QUANTUM)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_quantum(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        back: f64,
        front: f64,
        quantum: f64,
    ) -> Self {
        Self {
            left: snap(left, quantum),
            right: snap(right, quantum),
            bottom: snap(bottom, quantum),
            top: snap(top, quantum),
            back: snap(back, quantum),
            front: snap(front, quantum),
            quantum,
        }
    }

    /// Box with its back-left-bottom corner at `origin` and the given extents.
    pub fn from_origin(origin: Point3, width: f64, height: f64, depth: f64) -> Self {
        let mut b = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        b.set_corner(Corner::BackLeftBottom, origin);
        b.set_width(width);
        b.set_height(height);
        b.set_depth(depth);
        b
    }

    /// The unit box `0..1` on every axis.
    pub fn unit() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0)
    }

    pub fn quantum(&self) -> f64 {
        self.quantum
    }

    /// Re-snap all bounds to a different quantum.
    pub fn requantize(&mut self, quantum: f64) {
        *self = Self::with_quantum(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.back,
            self.front,
            quantum,
        );
    }

    fn snapped(&self, value: f64) -> f64 {
        snap(value, self.quantum)
    }

    // ── Bounds ──────────────────────────────────────────────────────────────

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn back(&self) -> f64 {
        self.back
    }

    pub fn front(&self) -> f64 {
        self.front
    }

    pub fn set_left(&mut self, value: f64) {
        self.left = self.snapped(value);
    }

    pub fn set_right(&mut self, value: f64) {
        self.right = self.snapped(value);
    }

    pub fn set_bottom(&mut self, value: f64) {
        self.bottom = self.snapped(value);
    }

    pub fn set_top(&mut self, value: f64) {
        self.top = self.snapped(value);
    }

    pub fn set_back(&mut self, value: f64) {
        self.back = self.snapped(value);
    }

    pub fn set_front(&mut self, value: f64) {
        self.front = self.snapped(value);
    }

    /// Lower bound of the pair `side` (left, bottom or back).
    pub fn lower(&self, side: Side) -> f64 {
        match side {
            Side::LeftRight => self.left,
            Side::BottomTop => self.bottom,
            Side::BackFront => self.back,
        }
    }

    /// Upper bound of the pair `side` (right, top or front).
    pub fn upper(&self, side: Side) -> f64 {
        match side {
            Side::LeftRight => self.right,
            Side::BottomTop => self.top,
            Side::BackFront => self.front,
        }
    }

    pub fn set_lower(&mut self, side: Side, value: f64) {
        match side {
            Side::LeftRight => self.set_left(value),
            Side::BottomTop => self.set_bottom(value),
            Side::BackFront => self.set_back(value),
        }
    }

    pub fn set_upper(&mut self, side: Side, value: f64) {
        match side {
            Side::LeftRight => self.set_right(value),
            Side::BottomTop => self.set_top(value),
            Side::BackFront => self.set_front(value),
        }
    }

    // ── Sizes ───────────────────────────────────────────────────────────────

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn depth(&self) -> f64 {
        self.front - self.back
    }

    /// Extent along the axis perpendicular to `side`.
    pub fn extent(&self, side: Side) -> f64 {
        self.upper(side) - self.lower(side)
    }

    /// Set the extent along `side`'s axis.
    ///
    /// A non-negative value moves the upper bound (`upper = lower + value`).
    /// A negative value moves the lower bound instead (`lower = upper + value`),
    /// growing the box on the opposite side by `|value|`.
    pub fn set_extent(&mut self, side: Side, value: f64) {
        if value < 0.0 {
            let upper = self.upper(side);
            self.set_lower(side, upper + value);
        } else {
            let lower = self.lower(side);
            self.set_upper(side, lower + value);
        }
    }

    pub fn set_width(&mut self, value: f64) {
        self.set_extent(Side::LeftRight, value);
    }

    pub fn set_height(&mut self, value: f64) {
        self.set_extent(Side::BottomTop, value);
    }

    pub fn set_depth(&mut self, value: f64) {
        self.set_extent(Side::BackFront, value);
    }

    pub fn volume(&self) -> f64 {
        self.width() * self.height() * self.depth()
    }

    // ── Corners ─────────────────────────────────────────────────────────────

    /// Position of `corner` as `(x, y, z) = (back|front, left|right, bottom|top)`.
    pub fn corner(&self, corner: Corner) -> Point3 {
        let x = if corner.is_front() { self.front } else { self.back };
        let y = if corner.is_right() { self.right } else { self.left };
        let z = if corner.is_top() { self.top } else { self.bottom };
        Point3::new(x, y, z)
    }

    /// Move `corner` to `point`.
    ///
    /// Writes exactly three bounds, in order: the x bound (back or front) from
    /// `point.x`, the y bound (left or right) from `point.y`, the z bound
    /// (bottom or top) from `point.z`. Corners that share a bound overwrite each
    /// other; the last call wins.
    pub fn set_corner(&mut self, corner: Corner, point: Point3) {
        if corner.is_front() {
            self.set_front(point.x);
        } else {
            self.set_back(point.x);
        }
        if corner.is_right() {
            self.set_right(point.y);
        } else {
            self.set_left(point.y);
        }
        if corner.is_top() {
            self.set_top(point.z);
        } else {
            self.set_bottom(point.z);
        }
    }

    /// The back-left-bottom corner.
    pub fn min_corner(&self) -> Point3 {
        self.corner(Corner::BackLeftBottom)
    }

    /// The front-right-top corner.
    pub fn max_corner(&self) -> Point3 {
        self.corner(Corner::FrontRightTop)
    }

    /// Extents as `(depth, width, height)`, matching the x/y/z axis order.
    pub fn size(&self) -> Point3 {
        self.max_corner() - self.min_corner()
    }

    pub fn center(&self) -> Point3 {
        self.min_corner() + self.size() * 0.5
    }

    // ── Moves ───────────────────────────────────────────────────────────────

    /// Translate every bound by the delta of its axis.
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.set_back(self.back + dx);
        self.set_front(self.front + dx);
        self.set_left(self.left + dy);
        self.set_right(self.right + dy);
        self.set_bottom(self.bottom + dz);
        self.set_top(self.top + dz);
    }

    /// Translate both bounds of `side`'s pair by `delta`.
    pub fn translate_along(&mut self, side: Side, delta: f64) {
        let lower = self.lower(side);
        let upper = self.upper(side);
        self.set_lower(side, lower + delta);
        self.set_upper(side, upper + delta);
    }

    /// Copy of this box translated by `delta`.
    pub fn translated(&self, delta: Point3) -> Self {
        let mut moved = *self;
        moved.translate(delta.x, delta.y, delta.z);
        moved
    }

    /// Volume shared with `other`; zero when the boxes only touch or are apart.
    pub fn overlap_volume(&self, other: &IntervalBox) -> f64 {
        Side::ALL
            .iter()
            .map(|&s| {
                let lo = self.lower(s).max(other.lower(s));
                let hi = self.upper(s).min(other.upper(s));
                (hi - lo).max(0.0)
            })
            .product()
    }
}

impl Default for IntervalBox {
    fn default() -> Self {
        Self::unit()
    }
}

impl fmt::Display for IntervalBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "box: {} to {}, {} to {}, {} to {}",
            self.left, self.right, self.bottom, self.top, self.back, self.front
        )
    }
}
