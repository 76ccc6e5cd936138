use blueprint_types::{Point3, Quad};
use tracing::debug;

use crate::types::OpError;

/// A strip (or ring) of quads connecting two ordered point loops.
///
/// Quad `i` joins the pair `i → i + 1` as `[bottom_i, bottom_i+1, top_i+1, top_i]`.
/// A closed palisade also joins the last point back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Palisade {
    bottom: Vec<Point3>,
    top: Vec<Point3>,
    close_loop: bool,
}

impl Palisade {
    /// Palisade between `bottom` and `top`, which must have the same length:
    /// at least 2 points for an open strip, at least 3 for a closed ring.
    pub fn between(bottom: &[Point3], top: &[Point3], close_loop: bool) -> Result<Self, OpError> {
        if bottom.len() != top.len() {
            return Err(OpError::precondition(format!(
                "palisade loops differ in length: bottom has {}, top has {}",
                bottom.len(),
                top.len()
            )));
        }
        let min_points = if close_loop { 3 } else { 2 };
        if bottom.len() < min_points {
            return Err(OpError::precondition(format!(
                "{} palisade needs at least {min_points} points per loop, got {}",
                if close_loop { "closed" } else { "open" },
                bottom.len()
            )));
        }
        Ok(Self {
            bottom: bottom.to_vec(),
            top: top.to_vec(),
            close_loop,
        })
    }

    /// Palisade whose top loop is `base` moved by `offset`.
    pub fn extruded(base: &[Point3], offset: Point3, close_loop: bool) -> Result<Self, OpError> {
        let top: Vec<Point3> = base.iter().map(|p| p + offset).collect();
        Self::between(base, &top, close_loop)
    }

    pub fn bottom(&self) -> &[Point3] {
        &self.bottom
    }

    pub fn top(&self) -> &[Point3] {
        &self.top
    }

    pub fn is_closed(&self) -> bool {
        self.close_loop
    }

    /// Number of quads: one per point when closed, one fewer when open.
    pub fn quad_count(&self) -> usize {
        if self.close_loop {
            self.bottom.len()
        } else {
            self.bottom.len() - 1
        }
    }

    pub fn quads(&self) -> Vec<Quad> {
        let n = self.bottom.len();
        let quads: Vec<Quad> = (0..self.quad_count())
            .map(|i| {
                let j = (i + 1) % n;
                Quad::new(self.bottom[i], self.bottom[j], self.top[j], self.top[i])
            })
            .collect();
        debug!(count = quads.len(), closed = self.close_loop, "palisade quads");
        quads
    }

    /// Points halfway between the two loops.
    pub fn mid_loop(&self) -> Vec<Point3> {
        self.bottom
            .iter()
            .zip(&self.top)
            .map(|(b, t)| b + (t - b) * 0.5)
            .collect()
    }
}
