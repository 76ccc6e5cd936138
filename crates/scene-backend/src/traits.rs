use crate::types::*;

/// Narrow contract between blueprint construction and whatever actually builds
/// meshes. Implemented by [`crate::MockScene`] (deterministic test double) and by
/// renderer bindings living outside this workspace.
///
/// Every call is synchronous; a returned error means the backend state was left
/// unchanged by that call.
pub trait SceneBackend {
    /// Materialize a primitive (or an empty transform node) named `name`.
    fn create_primitive(
        &mut self,
        name: &str,
        spec: &PrimitiveSpec,
    ) -> Result<ObjectHandle, BackendError>;

    /// Attach `child` under `parent` in the transform hierarchy.
    fn set_transform_parent(
        &mut self,
        child: ObjectHandle,
        parent: ObjectHandle,
    ) -> Result<(), BackendError>;

    /// Move an object by `offset`.
    fn translate(&mut self, handle: ObjectHandle, offset: Point3) -> Result<(), BackendError>;

    /// Apply a boolean modifier to `target` with `operand` and bake it
    /// immediately. Returns the handle holding the result (normally `target`).
    fn apply_boolean(
        &mut self,
        target: ObjectHandle,
        operand: ObjectHandle,
        op: BooleanOp,
    ) -> Result<ObjectHandle, BackendError>;

    fn set_visible(&mut self, handle: ObjectHandle, visible: bool) -> Result<(), BackendError>;

    fn is_visible(&self, handle: ObjectHandle) -> Result<bool, BackendError>;

    /// Remove an object. Children of a deleted object are detached, not deleted.
    fn delete(&mut self, handle: ObjectHandle) -> Result<(), BackendError>;

    /// Remove every object from the scene.
    fn reset(&mut self) -> Result<(), BackendError>;
}
