use std::path::PathBuf;

use tform_eval::EvalError;
use tform_syntax::ParseError;

/// Errors that can occur while loading an instance.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("must load exactly one instance; loaded {0}")]
    InstanceCount(usize),

    #[error("no input files found in {}", .dir.display())]
    NoFiles { dir: PathBuf },

    #[error("{}: unsupported file type", .path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },

    #[error("{}: invalid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid path label {label:?}: expected an identifier or a quoted string")]
    InvalidLabel { label: String },

    #[error("{}: JSON data must be an object unless placed with --path", .path.display())]
    JsonNotObject { path: PathBuf },

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Convenience alias for loader results.
pub type LoadResult<T> = Result<T, LoadError>;
