//! Error types for the merge crate.

use tform_types::Path;

/// Two values that cannot be unified.
///
/// `path` is relative to the values passed to [`unify`](crate::unify).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", at_path(.path, .message))]
pub struct Conflict {
    pub path: Path,
    pub message: String,
}

impl Conflict {
    pub fn new(path: &Path, message: impl Into<String>) -> Self {
        Self {
            path: path.clone(),
            message: message.into(),
        }
    }
}

fn at_path(path: &Path, message: &str) -> String {
    if path.is_empty() {
        message.to_string()
    } else {
        format!("{path}: {message}")
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, Conflict>;
