pub mod mock_scene;
pub mod traits;
pub mod types;

pub use mock_scene::{MockScene, SceneEvent};
pub use traits::*;
pub use types::*;
