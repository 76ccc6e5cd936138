use scene_backend::BackendError;
use shape_ops::{ErrorCategory, OpError};
use slotmap::new_key_type;

new_key_type! {
    /// Key of a node in a [`crate::BlueprintTree`].
    pub struct NodeId;
}

/// Errors from blueprint construction and instantiation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("node not found: {id:?}")]
    NodeNotFound { id: NodeId },

    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("node `{name}` is already built")]
    AlreadyBuilt { name: String },

    #[error("node `{name}` is not built")]
    NotBuilt { name: String },

    #[error("parent `{parent}` of node `{name}` has not been built")]
    ParentNotBuilt { name: String, parent: String },

    #[error("node `{name}` is not a container")]
    NotAContainer { name: String },

    #[error("node `{name}` already has a parent")]
    ParentAlreadyLinked { name: String },

    #[error("linking `{name}` under `{parent}` would create a cycle")]
    ParentCycle { name: String, parent: String },

    #[error("operation error: {0}")]
    Op(#[from] OpError),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

impl EngineError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        EngineError::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::InvalidConfiguration { .. } => ErrorCategory::InvalidConfiguration,
            EngineError::NodeNotFound { .. }
            | EngineError::AlreadyBuilt { .. }
            | EngineError::NotBuilt { .. }
            | EngineError::ParentNotBuilt { .. }
            | EngineError::NotAContainer { .. }
            | EngineError::ParentAlreadyLinked { .. }
            | EngineError::ParentCycle { .. } => ErrorCategory::PreconditionViolation,
            EngineError::Op(e) => e.category(),
            EngineError::Backend(_) => ErrorCategory::BackendFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_backend::ObjectHandle;

    #[test]
    fn test_categories_follow_the_source_layer() {
        let not_visible = EngineError::from(OpError::NotVisible {
            handle: ObjectHandle::from_raw(3),
        });
        assert_eq!(not_visible.category(), ErrorCategory::BackendFailure);

        let backend = EngineError::from(BackendError::Other {
            message: "gone".into(),
        });
        assert_eq!(backend.category(), ErrorCategory::BackendFailure);

        let built = EngineError::AlreadyBuilt { name: "box".into() };
        assert_eq!(built.category(), ErrorCategory::PreconditionViolation);
        assert_eq!(built.to_string(), "node `box` is already built");

        assert_eq!(
            EngineError::config("bad").category(),
            ErrorCategory::InvalidConfiguration
        );
    }
}
