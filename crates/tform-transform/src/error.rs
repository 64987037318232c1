//! Error types for the transform crate.

use tform_merge::Conflict;
use tform_types::{NotConcrete, Path};

/// Errors that stop a run of transforms. None of them is recovered from.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TransformError {
    // -- document scope --
    #[error("document has no data field")]
    MissingData,

    #[error("data must be concrete: {source}")]
    DataNotConcrete { source: NotConcrete },

    #[error("document has no transforms field")]
    MissingTransforms,

    #[error("transforms must be a list, found {found}")]
    TransformsNotList { found: &'static str },

    #[error("{path}: transform must be a struct, found {found}")]
    MalformedTransform { path: Path, found: &'static str },

    // -- transform type --
    #[error("{path}: transform has no type")]
    MissingType { path: Path },

    #[error("{path}: transform type must be a string, found {found}")]
    TypeNotString { path: Path, found: String },

    #[error("{path}: don't know how to handle transform type {name:?}")]
    UnknownType { path: Path, name: String },

    // -- delete --
    #[error("{path}: delete path is not a reference")]
    NotAReference { path: Path },

    #[error("{reference} is not a reference into {scope}")]
    ReferenceOutOfScope { reference: Path, scope: Path },

    #[error("{path}: failed to find data to delete at {target}")]
    DeleteTargetMissing { path: Path, target: Path },

    #[error("{path}: expected {expected} at path {container}, found {found}")]
    ContainerShape {
        path: Path,
        container: Path,
        expected: &'static str,
        found: &'static str,
    },

    // -- unify --
    #[error("{path}: no value to insert")]
    MissingValue { path: Path },

    #[error("{path}: value is not concrete: {source}")]
    ValueNotConcrete { path: Path, source: NotConcrete },

    #[error("{path}: {source}")]
    MergeConflict { path: Path, source: Conflict },

    // -- results --
    #[error("{path}: transform left non-concrete value: {source}")]
    NonConcreteResult { path: Path, source: NotConcrete },

    #[error("data must be a struct, found {found}")]
    OutputNotStruct { found: &'static str },
}

/// Convenience alias for transform results.
pub type TransformResult<T> = Result<T, TransformError>;
