//! Depth-first materialization of blueprint nodes through a scene backend.

use blueprint_types::Point3;
use scene_backend::{ObjectHandle, SceneBackend};
use shape_ops::CompositionEngine;
use tracing::{debug, info, instrument};

use crate::config::BuildConfig;
use crate::tree::BlueprintTree;
use crate::types::{EngineError, NodeId};

/// Build `id` and everything below it, returning the node's handle.
///
/// Per node: create the object named after the node, apply its offset, build
/// the children in order, then attach the object to its parent. The parent's
/// handle is looked up before the backend is touched, so an unbuilt parent
/// fails without side effects for this node. The first backend failure
/// aborts the walk; nodes built before it keep their handles.
#[instrument(skip(tree, backend, config))]
pub fn instantiate(
    tree: &mut BlueprintTree,
    id: NodeId,
    backend: &mut dyn SceneBackend,
    config: &BuildConfig,
) -> Result<ObjectHandle, EngineError> {
    let node = tree.get(id)?;
    if node.is_built() {
        return Err(EngineError::AlreadyBuilt {
            name: node.name.clone(),
        });
    }
    let parent_handle = match tree.parent(id) {
        Some(parent_id) => {
            let parent = tree.get(parent_id)?;
            let handle = parent.handle().ok_or_else(|| EngineError::ParentNotBuilt {
                name: node.name.clone(),
                parent: parent.name.clone(),
            })?;
            Some(handle)
        }
        None => None,
    };

    let name = node.name.clone();
    let spec = node.shape.to_primitive_spec();
    let offset = node.offset;
    let children = node.children().to_vec();

    let handle = backend.create_primitive(&name, &spec)?;
    info!(node = %name, %handle, kind = spec.kind_name(), "object created");

    if offset != Point3::zeros() || !config.skip_zero_offsets {
        backend.translate(handle, offset)?;
        debug!(%handle, ?offset, "offset applied");
    }
    tree.mark_built(id, handle);

    for child in children {
        instantiate(tree, child, backend, config)?;
    }

    if let Some(parent) = parent_handle {
        backend.set_transform_parent(handle, parent)?;
        debug!(%handle, %parent, "attached to parent");
    }
    Ok(handle)
}

/// Build every root in insertion order.
pub fn instantiate_all(
    tree: &mut BlueprintTree,
    backend: &mut dyn SceneBackend,
    config: &BuildConfig,
) -> Result<Vec<ObjectHandle>, EngineError> {
    let roots = tree.roots().to_vec();
    let mut handles = Vec::with_capacity(roots.len());
    for root in roots {
        handles.push(instantiate(tree, root, backend, config)?);
    }
    Ok(handles)
}

/// Boolean post-pass over built nodes: the first node is the accumulator.
pub fn compose(
    tree: &BlueprintTree,
    nodes: &[NodeId],
    backend: &mut dyn SceneBackend,
    engine: &CompositionEngine,
) -> Result<ObjectHandle, EngineError> {
    let handles = nodes
        .iter()
        .map(|&id| {
            let node = tree.get(id)?;
            node.handle().ok_or_else(|| EngineError::NotBuilt {
                name: node.name.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(engine.apply(backend, &handles)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Node, Shape};
    use blueprint_types::IntervalBox;
    use scene_backend::{BooleanOp, MockScene, SceneEvent};
    use shape_ops::ErrorCategory;

    fn cuboid(name: &str) -> Node {
        Node::new(name, Shape::Cuboid(IntervalBox::unit()))
    }

    #[test]
    fn test_children_attach_to_container() {
        let mut tree = BlueprintTree::new();
        let root = tree.add_root(Node::container("root"));
        let a = tree.add_child(root, cuboid("a")).unwrap();
        let b = tree.add_child(root, cuboid("b")).unwrap();
        let mut scene = MockScene::new();

        let h = instantiate(&mut tree, root, &mut scene, &BuildConfig::default()).unwrap();
        let ha = tree.handle(a).unwrap();
        let hb = tree.handle(b).unwrap();
        assert_eq!(scene.children_of(h), vec![ha, hb]);
        assert_eq!(scene.object(h).unwrap().name, "root");
    }

    #[test]
    fn test_zero_offset_skipped_by_default() {
        let mut tree = BlueprintTree::new();
        tree.add_root(cuboid("still"));
        tree.add_root(cuboid("moved").with_offset(Point3::new(0.0, 0.0, 0.5)));
        let mut scene = MockScene::new();
        instantiate_all(&mut tree, &mut scene, &BuildConfig::default()).unwrap();

        let translations = scene
            .events()
            .iter()
            .filter(|e| matches!(e, SceneEvent::Translated { .. }))
            .count();
        assert_eq!(translations, 1);

        let mut tree2 = BlueprintTree::new();
        tree2.add_root(cuboid("still"));
        let mut scene2 = MockScene::new();
        instantiate_all(&mut tree2, &mut scene2, &BuildConfig::exact()).unwrap();
        assert!(matches!(
            scene2.events().last(),
            Some(SceneEvent::Translated { .. })
        ));
    }

    #[test]
    fn test_second_instantiation_rejected() {
        let mut tree = BlueprintTree::new();
        let id = tree.add_root(cuboid("once"));
        let mut scene = MockScene::new();
        let config = BuildConfig::default();
        instantiate(&mut tree, id, &mut scene, &config).unwrap();
        let err = instantiate(&mut tree, id, &mut scene, &config).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::PreconditionViolation);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_unbuilt_parent_makes_no_backend_calls() {
        let mut tree = BlueprintTree::new();
        let parent = tree.add_root(Node::container("parent"));
        let child = tree.add_child(parent, cuboid("child")).unwrap();
        let mut scene = MockScene::new();

        let err = instantiate(&mut tree, child, &mut scene, &BuildConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EngineError::ParentNotBuilt {
                name: "child".into(),
                parent: "parent".into()
            }
        );
        assert!(scene.events().is_empty());
    }

    #[test]
    fn test_compose_requires_built_nodes() {
        let mut tree = BlueprintTree::new();
        let a = tree.add_root(cuboid("a"));
        let b = tree.add_root(cuboid("b"));
        let mut scene = MockScene::new();
        let engine = CompositionEngine::new(BooleanOp::Union);

        let err = compose(&tree, &[a, b], &mut scene, &engine).unwrap_err();
        assert_eq!(err, EngineError::NotBuilt { name: "a".into() });

        instantiate_all(&mut tree, &mut scene, &BuildConfig::default()).unwrap();
        let acc = compose(&tree, &[a, b], &mut scene, &engine).unwrap();
        assert_eq!(Some(acc), tree.handle(a));
        assert_eq!(scene.object(acc).unwrap().modifiers.len(), 1);
    }
}
