//! Error types for value inspection.

use std::fmt;

use crate::path::Path;

/// A value that failed the concreteness check.
///
/// `path` is relative to the value that was validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotConcrete {
    pub path: Path,
    pub reason: String,
}

impl fmt::Display for NotConcrete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.reason)
        } else {
            write!(f, "{}: {}", self.path, self.reason)
        }
    }
}

impl std::error::Error for NotConcrete {}
