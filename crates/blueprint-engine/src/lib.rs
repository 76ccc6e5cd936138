pub mod builders;
pub mod config;
pub mod instantiate;
pub mod tree;
pub mod types;

use scene_backend::{ObjectHandle, SceneBackend};
use shape_ops::CompositionEngine;
use tracing::info;

pub use builders::*;
pub use config::BuildConfig;
pub use instantiate::{compose, instantiate, instantiate_all};
pub use tree::{BlueprintTree, Node, Shape};
pub use types::{EngineError, NodeId};

/// A blueprint tree together with the settings it is built with.
///
/// Thin convenience layer over the free functions: lay out subtrees with the
/// builders on `tree`, then `build` into a backend and `compose` the results.
#[derive(Debug, Clone, Default)]
pub struct Workbench {
    pub tree: BlueprintTree,
    pub config: BuildConfig,
}

impl Workbench {
    pub fn new(config: BuildConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            tree: BlueprintTree::new(),
            config,
        })
    }

    /// Instantiate every root.
    pub fn build(&mut self, backend: &mut dyn SceneBackend) -> Result<Vec<ObjectHandle>, EngineError> {
        let handles = instantiate_all(&mut self.tree, backend, &self.config)?;
        info!(roots = handles.len(), nodes = self.tree.len(), "blueprints built");
        Ok(handles)
    }

    pub fn compose(
        &self,
        nodes: &[NodeId],
        backend: &mut dyn SceneBackend,
        engine: &CompositionEngine,
    ) -> Result<ObjectHandle, EngineError> {
        compose(&self.tree, nodes, backend, engine)
    }

    /// Clear the backend and forget every handle so the tree can be built again.
    pub fn reset(&mut self, backend: &mut dyn SceneBackend) -> Result<(), EngineError> {
        backend.reset()?;
        self.tree.forget_handles();
        Ok(())
    }
}
