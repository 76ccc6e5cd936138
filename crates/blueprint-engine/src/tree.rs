use blueprint_types::{IntervalBox, Point3, PolygonMesh};
use scene_backend::{ConeParams, CylinderParams, ObjectHandle, PrimitiveSpec};
use serde::{Deserialize, Serialize};
use slotmap::{SecondaryMap, SlotMap};

use crate::types::{EngineError, NodeId};

/// What a node materializes as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Container: an empty transform node that owns child nodes.
    Empty,
    Cuboid(IntervalBox),
    Polygon(PolygonMesh),
    Cylinder(CylinderParams),
    Cone(ConeParams),
}

impl Shape {
    pub fn is_container(&self) -> bool {
        matches!(self, Shape::Empty)
    }

    pub fn to_primitive_spec(&self) -> PrimitiveSpec {
        match self {
            Shape::Empty => PrimitiveSpec::Empty,
            Shape::Cuboid(bounds) => PrimitiveSpec::Cuboid { bounds: *bounds },
            Shape::Polygon(mesh) => PrimitiveSpec::Polygon { mesh: mesh.clone() },
            Shape::Cylinder(params) => PrimitiveSpec::Cylinder { params: *params },
            Shape::Cone(params) => PrimitiveSpec::Cone { params: *params },
        }
    }
}

/// One blueprint: a named shape, its offset, and (for containers) its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub shape: Shape,
    /// Applied with a translate call right after creation.
    pub offset: Point3,
    children: Vec<NodeId>,
    handle: Option<ObjectHandle>,
}

impl Node {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            offset: Point3::zeros(),
            children: Vec::new(),
            handle: None,
        }
    }

    pub fn container(name: impl Into<String>) -> Self {
        Self::new(name, Shape::Empty)
    }

    pub fn with_offset(mut self, offset: Point3) -> Self {
        self.offset = offset;
        self
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Backend handle, once instantiated.
    pub fn handle(&self) -> Option<ObjectHandle> {
        self.handle
    }

    pub fn is_built(&self) -> bool {
        self.handle.is_some()
    }
}

/// Arena of blueprint nodes.
///
/// Containers own their children through ordered key lists; nodes that no
/// container owns are roots. Parent links live in a separate map and are only
/// used to find the parent's handle at instantiation time.
#[derive(Debug, Clone, Default)]
pub struct BlueprintTree {
    nodes: SlotMap<NodeId, Node>,
    roots: Vec<NodeId>,
    parents: SecondaryMap<NodeId, NodeId>,
}

impl BlueprintTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn get(&self, id: NodeId) -> Result<&Node, EngineError> {
        self.nodes.get(id).ok_or(EngineError::NodeNotFound { id })
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id).copied()
    }

    pub fn handle(&self, id: NodeId) -> Option<ObjectHandle> {
        self.nodes.get(id).and_then(|n| n.handle)
    }

    /// Add a node that no container owns.
    pub fn add_root(&mut self, node: Node) -> NodeId {
        let id = self.nodes.insert(node);
        self.roots.push(id);
        id
    }

    /// Add `node` as the last child of the container `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, EngineError> {
        let owner = self.get(parent)?;
        if !owner.shape.is_container() {
            return Err(EngineError::NotAContainer {
                name: owner.name.clone(),
            });
        }
        if owner.is_built() {
            return Err(EngineError::AlreadyBuilt {
                name: owner.name.clone(),
            });
        }
        let id = self.nodes.insert(node);
        self.parents.insert(id, parent);
        if let Some(owner) = self.nodes.get_mut(parent) {
            owner.children.push(id);
        }
        Ok(id)
    }

    /// Add under `parent` when given, as a root otherwise.
    pub fn insert(&mut self, parent: Option<NodeId>, node: Node) -> Result<NodeId, EngineError> {
        match parent {
            Some(parent) => self.add_child(parent, node),
            None => Ok(self.add_root(node)),
        }
    }

    /// Declare `parent` as the transform parent of the root `child` without
    /// transferring ownership. The root stays in the root list and must be
    /// instantiated after its parent.
    pub fn link_parent(&mut self, child: NodeId, parent: NodeId) -> Result<(), EngineError> {
        let child_node = self.get(child)?;
        let parent_node = self.get(parent)?;
        if self.parents.contains_key(child) {
            return Err(EngineError::ParentAlreadyLinked {
                name: child_node.name.clone(),
            });
        }
        if self.ancestors(parent).any(|a| a == child) {
            return Err(EngineError::ParentCycle {
                name: child_node.name.clone(),
                parent: parent_node.name.clone(),
            });
        }
        self.parents.insert(child, parent);
        Ok(())
    }

    /// `id` followed by its parent chain.
    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&n| self.parent(n))
    }

    /// Remove an unbuilt node and everything below it.
    pub fn remove(&mut self, id: NodeId) -> Result<Node, EngineError> {
        let node = self.get(id)?;
        if node.is_built() {
            return Err(EngineError::AlreadyBuilt {
                name: node.name.clone(),
            });
        }
        let subtree = self.depth_first(id);

        match self.parent(id) {
            Some(p) if !self.roots.contains(&id) => {
                if let Some(owner) = self.nodes.get_mut(p) {
                    owner.children.retain(|c| *c != id);
                }
            }
            _ => self.roots.retain(|r| *r != id),
        }
        // Roots linked under a removed node lose their parent.
        let orphans: Vec<NodeId> = self
            .parents
            .iter()
            .filter(|(_, p)| subtree.contains(*p))
            .map(|(c, _)| c)
            .collect();
        for orphan in orphans {
            self.parents.remove(orphan);
        }

        let mut removed = None;
        for n in subtree {
            self.parents.remove(n);
            let taken = self.nodes.remove(n);
            if n == id {
                removed = taken;
            }
        }
        removed.ok_or(EngineError::NodeNotFound { id })
    }

    /// `id` and its descendants in pre-order.
    pub fn depth_first(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if let Some(node) = self.nodes.get(n) {
                order.push(n);
                stack.extend(node.children.iter().rev());
            }
        }
        order
    }

    /// First node named `name` in pre-order over all roots.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.roots
            .iter()
            .flat_map(|r| self.depth_first(*r))
            .find(|id| self.nodes[*id].name == name)
    }

    pub fn set_offset(&mut self, id: NodeId, offset: Point3) -> Result<(), EngineError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or(EngineError::NodeNotFound { id })?;
        if node.is_built() {
            return Err(EngineError::AlreadyBuilt {
                name: node.name.clone(),
            });
        }
        node.offset = offset;
        Ok(())
    }

    pub(crate) fn mark_built(&mut self, id: NodeId, handle: ObjectHandle) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.handle = Some(handle);
        }
    }

    /// Drop every handle, e.g. after the backend was reset, so the tree can be
    /// instantiated again.
    pub fn forget_handles(&mut self) {
        for node in self.nodes.values_mut() {
            node.handle = None;
        }
    }
}
