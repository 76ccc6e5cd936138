//! MockScene: a deterministic in-memory scene implementing SceneBackend.
//!
//! Records every object, its parent link, accumulated translation, visibility
//! and baked boolean modifiers, plus an ordered event log. Used by shape-ops and
//! blueprint-engine tests and for dry runs without a renderer.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::traits::SceneBackend;
use crate::types::*;

/// A boolean modifier that has been baked into an object.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedBoolean {
    pub op: BooleanOp,
    pub operand: ObjectHandle,
    pub operand_name: String,
}

/// One object in the mock scene.
#[derive(Debug, Clone, PartialEq)]
pub struct MockObject {
    /// Unique name (a `.001`-style suffix is added on collisions).
    pub name: String,
    pub spec: PrimitiveSpec,
    pub parent: Option<ObjectHandle>,
    /// Translation relative to the parent.
    pub translation: Point3,
    pub visible: bool,
    pub modifiers: Vec<AppliedBoolean>,
}

/// Observable side effect, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    Created {
        handle: ObjectHandle,
        name: String,
        kind: &'static str,
    },
    Translated {
        handle: ObjectHandle,
        offset: Point3,
    },
    Parented {
        child: ObjectHandle,
        parent: ObjectHandle,
    },
    BooleanApplied {
        target: ObjectHandle,
        operand: ObjectHandle,
        op: BooleanOp,
    },
    VisibilityChanged {
        handle: ObjectHandle,
        visible: bool,
    },
    Deleted {
        handle: ObjectHandle,
    },
    Reset,
}

/// Deterministic test double for the scene backend.
#[derive(Debug, Default)]
pub struct MockScene {
    next_handle: u64,
    objects: BTreeMap<u64, MockObject>,
    events: Vec<SceneEvent>,
    /// Names for which create_primitive fails (failure injection).
    rejected_names: HashSet<String>,
}

impl MockScene {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            ..Self::default()
        }
    }

    fn alloc_handle(&mut self) -> ObjectHandle {
        // `Default` leaves the counter at zero; handles start at 1 either way.
        self.next_handle = self.next_handle.max(1);
        let h = ObjectHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    fn get(&self, handle: ObjectHandle) -> Result<&MockObject, BackendError> {
        self.objects
            .get(&handle.0)
            .ok_or(BackendError::ObjectNotFound { handle })
    }

    fn get_mut(&mut self, handle: ObjectHandle) -> Result<&mut MockObject, BackendError> {
        self.objects
            .get_mut(&handle.0)
            .ok_or(BackendError::ObjectNotFound { handle })
    }

    fn unique_name(&self, name: &str) -> String {
        let taken = |candidate: &str| self.objects.values().any(|o| o.name == candidate);
        if !taken(name) {
            return name.to_string();
        }
        (1u32..)
            .map(|i| format!("{name}.{i:03}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| name.to_string())
    }

    /// Make every later `create_primitive` called with `name` fail.
    pub fn reject_primitives_named(&mut self, name: impl Into<String>) {
        self.rejected_names.insert(name.into());
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&MockObject> {
        self.objects.get(&handle.0)
    }

    /// All live objects in creation order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectHandle, &MockObject)> {
        self.objects.iter().map(|(id, o)| (ObjectHandle(*id), o))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Handle of the object with exactly this name.
    pub fn find(&self, name: &str) -> Option<ObjectHandle> {
        self.objects()
            .find(|(_, o)| o.name == name)
            .map(|(h, _)| h)
    }

    /// Direct children of `handle`, in creation order.
    pub fn children_of(&self, handle: ObjectHandle) -> Vec<ObjectHandle> {
        self.objects()
            .filter(|(_, o)| o.parent == Some(handle))
            .map(|(h, _)| h)
            .collect()
    }

    /// Translation accumulated along the parent chain.
    pub fn world_translation(&self, handle: ObjectHandle) -> Option<Point3> {
        let mut total = Point3::zeros();
        let mut current = Some(handle);
        while let Some(h) = current {
            let obj = self.object(h)?;
            total += obj.translation;
            current = obj.parent;
        }
        Some(total)
    }

    fn is_ancestor_or_self(&self, candidate: ObjectHandle, of: ObjectHandle) -> bool {
        let mut current = Some(of);
        while let Some(h) = current {
            if h == candidate {
                return true;
            }
            current = self.object(h).and_then(|o| o.parent);
        }
        false
    }
}

fn validate_spec(spec: &PrimitiveSpec) -> Result<(), BackendError> {
    let reject = |reason: &str| {
        Err(BackendError::PrimitiveRejected {
            reason: reason.to_string(),
        })
    };
    match spec {
        PrimitiveSpec::Empty => Ok(()),
        PrimitiveSpec::Cuboid { bounds } => {
            if bounds.min_corner().iter().chain(bounds.max_corner().iter()).all(|v| v.is_finite()) {
                Ok(())
            } else {
                reject("cuboid bounds must be finite")
            }
        }
        PrimitiveSpec::Cylinder { params } => {
            if !(params.radius > 0.0 && params.height > 0.0) {
                reject("cylinder radius and height must be positive")
            } else if params.resolution < 3 {
                reject("cylinder needs at least 3 segments")
            } else {
                Ok(())
            }
        }
        PrimitiveSpec::Cone { params } => {
            if params.bottom_radius < 0.0 || params.top_radius < 0.0 {
                reject("cone radii must not be negative")
            } else if params.bottom_radius == 0.0 && params.top_radius == 0.0 {
                reject("cone needs a non-zero radius")
            } else if !(params.height > 0.0) {
                reject("cone height must be positive")
            } else if params.resolution < 3 {
                reject("cone needs at least 3 segments")
            } else {
                Ok(())
            }
        }
        PrimitiveSpec::Polygon { mesh } => {
            if mesh.is_consistent() {
                Ok(())
            } else {
                reject("polygon mesh indices are out of range")
            }
        }
    }
}

impl SceneBackend for MockScene {
    fn create_primitive(
        &mut self,
        name: &str,
        spec: &PrimitiveSpec,
    ) -> Result<ObjectHandle, BackendError> {
        if self.rejected_names.contains(name) {
            return Err(BackendError::PrimitiveRejected {
                reason: format!("creation of `{name}` was rejected"),
            });
        }
        validate_spec(spec)?;

        let name = self.unique_name(name);
        let handle = self.alloc_handle();
        debug!(%handle, %name, kind = spec.kind_name(), "mock object created");
        self.events.push(SceneEvent::Created {
            handle,
            name: name.clone(),
            kind: spec.kind_name(),
        });
        self.objects.insert(
            handle.0,
            MockObject {
                name,
                spec: spec.clone(),
                parent: None,
                translation: Point3::zeros(),
                visible: true,
                modifiers: Vec::new(),
            },
        );
        Ok(handle)
    }

    fn set_transform_parent(
        &mut self,
        child: ObjectHandle,
        parent: ObjectHandle,
    ) -> Result<(), BackendError> {
        self.get(parent)?;
        if let Some(existing) = self.get(child)?.parent {
            return Err(BackendError::AlreadyLinked {
                child,
                parent: existing,
            });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(BackendError::ParentCycle { child, parent });
        }
        self.get_mut(child)?.parent = Some(parent);
        self.events.push(SceneEvent::Parented { child, parent });
        Ok(())
    }

    fn translate(&mut self, handle: ObjectHandle, offset: Point3) -> Result<(), BackendError> {
        self.get_mut(handle)?.translation += offset;
        self.events.push(SceneEvent::Translated { handle, offset });
        Ok(())
    }

    fn apply_boolean(
        &mut self,
        target: ObjectHandle,
        operand: ObjectHandle,
        op: BooleanOp,
    ) -> Result<ObjectHandle, BackendError> {
        let operand_name = self.get(operand)?.name.clone();
        let target_obj = self.get(target)?;
        if target == operand {
            return Err(BackendError::Other {
                message: format!("cannot apply {op:?} of {target} with itself"),
            });
        }
        if !target_obj.visible {
            return Err(BackendError::HiddenTarget { handle: target });
        }
        self.get_mut(target)?.modifiers.push(AppliedBoolean {
            op,
            operand,
            operand_name,
        });
        self.events
            .push(SceneEvent::BooleanApplied { target, operand, op });
        Ok(target)
    }

    fn set_visible(&mut self, handle: ObjectHandle, visible: bool) -> Result<(), BackendError> {
        self.get_mut(handle)?.visible = visible;
        self.events
            .push(SceneEvent::VisibilityChanged { handle, visible });
        Ok(())
    }

    fn is_visible(&self, handle: ObjectHandle) -> Result<bool, BackendError> {
        Ok(self.get(handle)?.visible)
    }

    fn delete(&mut self, handle: ObjectHandle) -> Result<(), BackendError> {
        self.objects
            .remove(&handle.0)
            .ok_or(BackendError::ObjectNotFound { handle })?;
        for obj in self.objects.values_mut() {
            if obj.parent == Some(handle) {
                obj.parent = None;
            }
        }
        self.events.push(SceneEvent::Deleted { handle });
        Ok(())
    }

    fn reset(&mut self) -> Result<(), BackendError> {
        self.objects.clear();
        self.events.push(SceneEvent::Reset);
        Ok(())
    }
}
