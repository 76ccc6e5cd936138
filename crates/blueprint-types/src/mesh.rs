use serde::{Deserialize, Serialize};

use crate::Point3;

/// A planar quadrilateral given by four corners in anti-clockwise order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub corners: [Point3; 4],
}

impl Quad {
    pub fn new(a: Point3, b: Point3, c: Point3, d: Point3) -> Self {
        Self {
            corners: [a, b, c, d],
        }
    }

    /// The four boundary edges, `corners[i] → corners[i + 1]`, wrapping around.
    pub fn edges(&self) -> [(Point3, Point3); 4] {
        let c = &self.corners;
        [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
    }

    /// Unnormalized normal from the first three corners (right-hand rule).
    pub fn normal(&self) -> Point3 {
        let c = &self.corners;
        (c[1] - c[0]).cross(&(c[2] - c[0]))
    }

    pub fn centroid(&self) -> Point3 {
        self.corners.iter().sum::<Point3>() / 4.0
    }

    /// Number of edges this quad has in common with `other`, in either direction.
    pub fn shared_edges(&self, other: &Quad, tolerance: f64) -> usize {
        let same = |a: &Point3, b: &Point3| (a - b).norm() <= tolerance;
        self.edges()
            .iter()
            .filter(|(a, b)| {
                other
                    .edges()
                    .iter()
                    .any(|(c, d)| (same(a, c) && same(b, d)) || (same(a, d) && same(b, c)))
            })
            .count()
    }

    pub fn to_mesh(&self) -> PolygonMesh {
        PolygonMesh::from_loop(self.corners.to_vec())
    }
}

/// Custom polygon geometry: vertices plus explicit edge and face index lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonMesh {
    pub vertices: Vec<Point3>,
    pub edges: Vec<[usize; 2]>,
    pub faces: Vec<Vec<usize>>,
}

impl PolygonMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single face spanning `points` in order, with its boundary edges.
    pub fn from_loop(points: Vec<Point3>) -> Self {
        let n = points.len();
        let edges = (0..n).map(|i| [i, (i + 1) % n]).collect();
        let faces = if n >= 3 { vec![(0..n).collect()] } else { Vec::new() };
        Self {
            vertices: points,
            edges,
            faces,
        }
    }

    /// Append `other`, re-indexing its edges and faces.
    pub fn append(&mut self, other: &PolygonMesh) {
        let base = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.edges
            .extend(other.edges.iter().map(|[a, b]| [a + base, b + base]));
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|f| f.iter().map(|i| i + base).collect::<Vec<_>>()),
        );
    }

    /// True when every edge and face index refers to an existing vertex and
    /// every face has at least three corners.
    pub fn is_consistent(&self) -> bool {
        let n = self.vertices.len();
        self.edges.iter().all(|[a, b]| *a < n && *b < n && a != b)
            && self
                .faces
                .iter()
                .all(|f| f.len() >= 3 && f.iter().all(|i| *i < n))
    }
}
