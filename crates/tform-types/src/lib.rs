//! Foundation types for tform.
//!
//! Every other tform crate builds on these types: paths address locations in
//! a document, values are what a document evaluates to.
//!
//! # Key Types
//!
//! - [`Selector`] / [`Path`] -- Field-label or list-index components and their sequences
//! - [`Value`] -- Evaluated tree of structs, lists, scalars and placeholders
//! - [`Struct`] / [`Field`] -- Ordered fields, each with its [`Origin`]
//! - [`NotConcrete`] -- Why a value failed the concreteness check

pub mod error;
pub mod path;
pub mod value;

pub use error::NotConcrete;
pub use path::{is_identifier, quote, Path, Selector, SelectorKind};
pub use value::{Field, Kind, Origin, Struct, Value};
