use std::fmt;

use serde::{Deserialize, Serialize};

pub use blueprint_types::{IntervalBox, Point3, PolygonMesh};

/// Opaque handle to an object living in the scene backend.
/// NEVER persisted. Valid only for the backend session that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub(crate) u64);

impl ObjectHandle {
    /// Raw id, for diagnostics and backends implemented outside this crate.
    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Boolean modifier kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanOp {
    Union,
    Difference,
    Intersection,
}

/// Upright cylinder centered at `center`, its axis along +z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderParams {
    pub radius: f64,
    pub height: f64,
    /// Number of segments around the circumference.
    pub resolution: u32,
    pub center: Point3,
}

/// Upright (possibly truncated) cone centered at `center`, its axis along +z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConeParams {
    pub bottom_radius: f64,
    pub top_radius: f64,
    pub height: f64,
    pub resolution: u32,
    pub center: Point3,
}

/// Everything a backend needs to materialize one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PrimitiveSpec {
    /// A bare transform node with no geometry.
    Empty,
    Cuboid { bounds: IntervalBox },
    Cylinder { params: CylinderParams },
    Cone { params: ConeParams },
    Polygon { mesh: PolygonMesh },
}

impl PrimitiveSpec {
    pub fn kind_name(&self) -> &'static str {
        match self {
            PrimitiveSpec::Empty => "empty",
            PrimitiveSpec::Cuboid { .. } => "cuboid",
            PrimitiveSpec::Cylinder { .. } => "cylinder",
            PrimitiveSpec::Cone { .. } => "cone",
            PrimitiveSpec::Polygon { .. } => "polygon",
        }
    }
}

/// Errors reported by a scene backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("object not found: {handle}")]
    ObjectNotFound { handle: ObjectHandle },

    #[error("object {child} is already linked to parent {parent}")]
    AlreadyLinked {
        child: ObjectHandle,
        parent: ObjectHandle,
    },

    #[error("linking {child} under {parent} would create a cycle")]
    ParentCycle {
        child: ObjectHandle,
        parent: ObjectHandle,
    },

    #[error("boolean target {handle} is hidden")]
    HiddenTarget { handle: ObjectHandle },

    #[error("primitive rejected: {reason}")]
    PrimitiveRejected { reason: String },

    #[error("backend error: {message}")]
    Other { message: String },
}
