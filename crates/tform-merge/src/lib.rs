//! Merge engine for tform.
//!
//! Implements structural unification: two values combine when they are
//! compatible, field by field for structs and element by element for lists.
//! Placeholders (`_` and kinds) are narrowed by whatever they meet; two
//! different concrete scalars conflict.
//!
//! # Key Types
//!
//! - [`unify`] -- Merge two values, failing on the first conflict
//! - [`Conflict`] -- Where and why two values could not be merged

pub mod error;
mod unify;

pub use error::{Conflict, MergeResult};
pub use unify::{describe, unify};
