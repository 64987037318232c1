//! Instance loader for tform.
//!
//! Resolves command-line arguments into exactly one instance (a set of
//! source and data files evaluated together) and evaluates it into the root
//! document.
//!
//! # Key Types
//!
//! - [`load`] -- Arguments to evaluated root value
//! - [`Instance`] / [`instances`] -- Which files belong together
//! - [`LoadConfig`] -- File extensions and evaluation limits
//! - [`LoadError`] -- Why loading failed

pub mod config;
pub mod error;
mod instance;
mod json;
mod loader;

pub use config::LoadConfig;
pub use error::{LoadError, LoadResult};
pub use instance::{instances, Instance};
pub use json::{parse_json, parse_labels};
pub use loader::load;
