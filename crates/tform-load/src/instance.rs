//! Grouping of command-line arguments into instances.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LoadConfig;
use crate::error::{LoadError, LoadResult};

/// A set of input files evaluated together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    /// Directory the instance was found in, or `.` for files named directly.
    pub dir: PathBuf,
    /// Input files, in load order.
    pub files: Vec<PathBuf>,
}

/// Resolve arguments into instances.
///
/// Each directory is its own instance, made of the input files directly
/// inside it (hidden files excluded) sorted by name. All file arguments
/// together form one further instance. No arguments means the current
/// directory.
pub fn instances(args: &[String], config: &LoadConfig) -> LoadResult<Vec<Instance>> {
    let args: Vec<&str> = if args.is_empty() {
        vec!["."]
    } else {
        args.iter().map(String::as_str).collect()
    };

    let mut found = Vec::new();
    let mut loose = Vec::new();
    for arg in args {
        let path = PathBuf::from(arg);
        let metadata = std::fs::metadata(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        if metadata.is_dir() {
            let files = dir_files(&path, config)?;
            found.push(Instance { dir: path, files });
        } else if is_input(&path, config) {
            loose.push(path);
        } else {
            return Err(LoadError::UnsupportedFile { path });
        }
    }
    if !loose.is_empty() {
        found.push(Instance {
            dir: PathBuf::from("."),
            files: loose,
        });
    }
    Ok(found)
}

fn dir_files(dir: &Path, config: &LoadConfig) -> LoadResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dir.to_path_buf());
            LoadError::Io {
                path,
                source: err.into(),
            }
        })?;
        let hidden = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'));
        if entry.file_type().is_file() && !hidden && is_input(entry.path(), config) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_input(path: &Path, config: &LoadConfig) -> bool {
    has_extension(path, &config.source_extension) || has_extension(path, &config.data_extension)
}

pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}
