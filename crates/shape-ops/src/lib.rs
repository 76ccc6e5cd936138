pub mod boolean;
pub mod decompose;
pub mod frame;
pub mod palisade;
pub mod polygon;
pub mod types;

pub use boolean::{apply_pairwise, CompositionEngine};
pub use decompose::{decompose_box, BoxDecomposer, BoxWalls};
pub use frame::{Frame3dGeometry, FrameGeometry};
pub use palisade::Palisade;
pub use polygon::{prism_mesh, regular_polygon, tapered_loops, RegularPrism};
pub use types::*;
