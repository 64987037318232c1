//! Transform interpreter for tform.
//!
//! Applies the `transforms` of a document to its `data`, strictly in order,
//! stopping at the first error. Two transform types exist:
//!
//! - `delete` removes the element its `path` reference points at. The
//!   reference must lead into the transform's own `data` field; containers
//!   are rebuilt from the removed element up to the root.
//! - `unify` merges a concrete `value` into the data.
//!
//! After every transform the data must still be concrete.
//!
//! # Key Types
//!
//! - [`apply_document`] -- Run the transforms of an evaluated document
//! - [`Interpreter`] -- Apply a list of transform descriptors to data
//! - [`rebuild`] / [`Edit`] -- Copy a container with one element removed or replaced
//! - [`TransformError`] -- Why a transform could not be applied

pub mod document;
pub mod error;
pub mod interpreter;
pub mod rebuild;

pub use document::apply_document;
pub use error::{TransformError, TransformResult};
pub use interpreter::Interpreter;
pub use rebuild::{rebuild, rebuild_list, rebuild_struct, remove_path, Edit, RebuildError};
