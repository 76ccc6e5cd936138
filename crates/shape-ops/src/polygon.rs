use std::f64::consts::TAU;

use blueprint_types::{Point3, PolygonMesh};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::types::OpError;

/// `side_count` points evenly spaced on a circle of `radius` around `center`.
///
/// The circle lies in the plane z = `center.z` (prisms extrude along +z).
/// Point `i` sits at angle `i * 2π / side_count`, measured from +x towards +y.
pub fn regular_polygon(
    side_count: usize,
    radius: f64,
    center: Point3,
) -> Result<Vec<Point3>, OpError> {
    if side_count < 3 {
        return Err(OpError::config(format!(
            "a regular polygon needs at least 3 sides, got {side_count}"
        )));
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(OpError::config(format!(
            "polygon radius must be positive, got {radius}"
        )));
    }

    let step = TAU / side_count as f64;
    Ok((0..side_count)
        .map(|i| {
            let angle = step * i as f64;
            center + Point3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
        })
        .collect())
}

/// Bottom and top loops of a tapered prism of the given `height`.
pub fn tapered_loops(
    side_count: usize,
    bottom_radius: f64,
    top_radius: f64,
    height: f64,
    center: Point3,
) -> Result<(Vec<Point3>, Vec<Point3>), OpError> {
    if !(height.is_finite() && height > 0.0) {
        return Err(OpError::config(format!(
            "prism height must be positive, got {height}"
        )));
    }
    let bottom = regular_polygon(side_count, bottom_radius, center)?;
    let top = regular_polygon(side_count, top_radius, center + Point3::new(0.0, 0.0, height))?;
    Ok((bottom, top))
}

/// Close two equally long loops into a solid: one quad per side plus two caps.
///
/// Vertices are the bottom loop followed by the top loop. Side face `i` is
/// `[b_i, b_i+1, t_i+1, t_i]`; the bottom cap runs backwards so it faces away
/// from the top.
pub fn prism_mesh(bottom: &[Point3], top: &[Point3]) -> Result<PolygonMesh, OpError> {
    let n = bottom.len();
    if n < 3 || top.len() != n {
        return Err(OpError::precondition(format!(
            "prism loops need the same length of at least 3, got {} and {}",
            n,
            top.len()
        )));
    }

    let mut mesh = PolygonMesh::new();
    mesh.vertices.extend_from_slice(bottom);
    mesh.vertices.extend_from_slice(top);

    for i in 0..n {
        let j = (i + 1) % n;
        mesh.edges.push([i, j]);
        mesh.edges.push([n + i, n + j]);
        mesh.edges.push([i, n + i]);
        mesh.faces.push(vec![i, j, n + j, n + i]);
    }
    mesh.faces.push((0..n).rev().collect());
    mesh.faces.push((n..2 * n).collect());
    Ok(mesh)
}

/// Regular prism whose top may be narrower or wider than its base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegularPrism {
    pub side_count: usize,
    pub bottom_radius: f64,
    pub top_radius: f64,
    pub height: f64,
    /// Center of the bottom face.
    pub center: Point3,
}

impl RegularPrism {
    /// A straight prism (equal radii).
    pub fn straight(side_count: usize, radius: f64, height: f64, center: Point3) -> Self {
        Self {
            side_count,
            bottom_radius: radius,
            top_radius: radius,
            height,
            center,
        }
    }

    #[instrument(skip(self), fields(sides = self.side_count))]
    pub fn mesh(&self) -> Result<PolygonMesh, OpError> {
        let (bottom, top) = tapered_loops(
            self.side_count,
            self.bottom_radius,
            self.top_radius,
            self.height,
            self.center,
        )?;
        let mesh = prism_mesh(&bottom, &top)?;
        debug!(
            vertices = mesh.vertices.len(),
            faces = mesh.faces.len(),
            "prism mesh"
        );
        Ok(mesh)
    }
}
