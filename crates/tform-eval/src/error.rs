//! Error types for the evaluator.

use tform_types::Path;

/// Errors that stop evaluation of a document.
///
/// Conflicts between values are not errors here: they are carried as bottom
/// values and reported by whoever requires the value to be concrete.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// An identifier that no enclosing scope declares.
    #[error("reference \"{name}\" not found")]
    UnresolvedReference { name: String },

    /// A value that needs itself to be evaluated.
    #[error("{path}: structural cycle")]
    StructuralCycle { path: Path },

    /// A guard condition that did not evaluate to a boolean.
    #[error("{path}: guard condition must be a bool, found {found}")]
    InvalidGuard { path: Path, found: String },

    /// An operator applied to values it does not support.
    #[error("{path}: invalid operand for {op}: {message}")]
    InvalidOperand {
        path: Path,
        op: &'static str,
        message: String,
    },

    /// Evaluation nested deeper than the configured limit.
    #[error("{path}: evaluation exceeded maximum depth of {limit}")]
    DepthExceeded { path: Path, limit: usize },
}

/// Convenience alias for evaluation results.
pub type EvalResult<T> = Result<T, EvalError>;
