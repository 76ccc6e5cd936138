use scene_backend::{BackendError, ObjectHandle};

/// Coarse classification shared by every error type in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Parameters that can never produce valid geometry. Raised before any
    /// backend call.
    InvalidConfiguration,
    /// A call made out of order or with inputs that break a documented contract.
    PreconditionViolation,
    /// The scene backend refused an operation.
    BackendFailure,
}

/// Errors from shape derivations and boolean composition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OpError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("precondition violated: {reason}")]
    PreconditionViolation { reason: String },

    #[error("boolean accumulator {handle} is not visible")]
    NotVisible { handle: ObjectHandle },

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

impl OpError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        OpError::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub(crate) fn precondition(reason: impl Into<String>) -> Self {
        OpError::PreconditionViolation {
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            OpError::InvalidConfiguration { .. } => ErrorCategory::InvalidConfiguration,
            OpError::PreconditionViolation { .. } => ErrorCategory::PreconditionViolation,
            OpError::NotVisible { .. } | OpError::Backend(_) => ErrorCategory::BackendFailure,
        }
    }
}
