use scene_backend::{BooleanOp, ObjectHandle, SceneBackend};
use tracing::{debug, info, instrument};

use crate::types::OpError;

/// Sequences boolean modifiers over already materialized objects.
///
/// The first object is the accumulator. Every further object is applied to it
/// as a separate two-object boolean that is baked before the next one starts,
/// so each step sees the updated accumulator. Multi-object modifiers are never
/// issued; backends are not reliable with unions of more than two objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionEngine {
    op: BooleanOp,
    consume_operands: bool,
}

impl CompositionEngine {
    pub fn new(op: BooleanOp) -> Self {
        Self {
            op,
            consume_operands: false,
        }
    }

    /// Delete each operand once it has been baked into the accumulator.
    pub fn consume_operands(mut self, consume: bool) -> Self {
        self.consume_operands = consume;
        self
    }

    pub fn op(&self) -> BooleanOp {
        self.op
    }

    /// Apply the operation across `objects`; returns the accumulator handle.
    #[instrument(skip(self, backend, objects), fields(op = ?self.op, count = objects.len()))]
    pub fn apply(
        &self,
        backend: &mut dyn SceneBackend,
        objects: &[ObjectHandle],
    ) -> Result<ObjectHandle, OpError> {
        let (&first, operands) = objects.split_first().ok_or_else(|| {
            OpError::precondition("boolean composition needs at least 2 objects, got 0")
        })?;
        if operands.is_empty() {
            return Err(OpError::precondition(
                "boolean composition needs at least 2 objects, got 1",
            ));
        }
        if let Some(dup) = operands.iter().find(|h| **h == first) {
            return Err(OpError::precondition(format!(
                "accumulator {dup} also appears as an operand"
            )));
        }
        if !backend.is_visible(first)? {
            return Err(OpError::NotVisible { handle: first });
        }

        let mut accumulator = first;
        for &operand in operands {
            accumulator = backend.apply_boolean(accumulator, operand, self.op)?;
            debug!(%accumulator, %operand, "boolean baked");
            if self.consume_operands {
                backend.delete(operand)?;
                debug!(%operand, "operand removed");
            }
        }
        info!(%accumulator, steps = operands.len(), "boolean composition finished");
        Ok(accumulator)
    }
}

/// Apply `op` pairwise across `objects` (see [`CompositionEngine`]).
pub fn apply_pairwise(
    backend: &mut dyn SceneBackend,
    objects: &[ObjectHandle],
    op: BooleanOp,
) -> Result<ObjectHandle, OpError> {
    CompositionEngine::new(op).apply(backend, objects)
}
