pub mod interval_box;
pub mod mesh;
pub mod rounding;
pub mod side;

pub use interval_box::*;
pub use mesh::*;
pub use rounding::*;
pub use side::*;

/// Point or direction in blueprint space.
///
/// Axis convention shared by every crate: x runs back→front, y runs left→right,
/// z runs bottom→top.
pub type Point3 = nalgebra::Vector3<f64>;
