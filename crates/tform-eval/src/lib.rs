//! Evaluator for tform documents.
//!
//! Turns the parsed files of one instance into a single [`Value`]. Fields are
//! resolved lazily by path, so a reference may point anywhere in the document,
//! including into a struct that is still being evaluated. Fields declared as
//! a single reference keep the referenced path as their [`Origin`].
//!
//! # Key Types
//!
//! - [`evaluate`] -- Evaluate the files of one instance
//! - [`EvalConfig`] -- Evaluation limits
//! - [`EvalError`] -- Why a document could not be evaluated
//!
//! [`Value`]: tform_types::Value
//! [`Origin`]: tform_types::Origin

pub mod config;
pub mod error;
mod eval;

pub use config::EvalConfig;
pub use error::{EvalError, EvalResult};
pub use eval::evaluate;
