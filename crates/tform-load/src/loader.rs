use tform_eval::evaluate;
use tform_syntax::parse_file;
use tform_types::Value;

use crate::config::LoadConfig;
use crate::error::{LoadError, LoadResult};
use crate::instance::{has_extension, instances};
use crate::json::{parse_json, parse_labels};

/// Load exactly one instance from `args` and evaluate it.
///
/// `labels` places the content of JSON data files; see [`parse_json`].
pub fn load(args: &[String], labels: &[String], config: &LoadConfig) -> LoadResult<Value> {
    let mut found = instances(args, config)?;
    if found.len() != 1 {
        return Err(LoadError::InstanceCount(found.len()));
    }
    let Some(instance) = found.pop() else {
        return Err(LoadError::InstanceCount(0));
    };
    if instance.files.is_empty() {
        return Err(LoadError::NoFiles { dir: instance.dir });
    }

    let labels = parse_labels(labels)?;
    let mut files = Vec::with_capacity(instance.files.len());
    for path in &instance.files {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let file = if has_extension(path, &config.data_extension) {
            parse_json(path, &text, &labels)?
        } else {
            parse_file(path.display().to_string(), &text).map_err(|source| {
                LoadError::Parse {
                    path: path.clone(),
                    source,
                }
            })?
        };
        tracing::debug!(file = %path.display(), decls = file.decls.len(), "read input file");
        files.push(file);
    }

    tracing::info!(
        dir = %instance.dir.display(),
        files = files.len(),
        "loaded instance"
    );
    Ok(evaluate(&files, &config.eval)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tform_types::path;

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn arg(path: &Path) -> String {
        path.display().to_string()
    }

    fn labels(value: &Value) -> Vec<&str> {
        value.as_struct().unwrap().labels().collect()
    }

    #[test]
    fn directory_is_one_instance() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.tfm", "b: a");
        write(dir.path(), "a.tfm", "a: 1");
        write(dir.path(), "notes.txt", "not an input");
        write(dir.path(), ".hidden.tfm", "this does not parse {");
        fs::create_dir(dir.path().join("sub")).unwrap();
        write(&dir.path().join("sub"), "c.tfm", "c: 3");

        let value = load(&[arg(dir.path())], &[], &LoadConfig::default()).unwrap();
        assert_eq!(labels(&value), vec!["a", "b"]);
        assert_eq!(value.lookup(&path!["b"]), Some(&Value::Int(1)));
    }

    #[test]
    fn file_arguments_form_one_instance() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.tfm", "a: 1");
        let b = write(dir.path(), "b.tfm", "b: 2");
        let found = instances(&[arg(&a), arg(&b)], &LoadConfig::default()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].files, vec![a.clone(), b.clone()]);

        let value = load(&[arg(&b), arg(&a)], &[], &LoadConfig::default()).unwrap();
        assert_eq!(labels(&value), vec!["b", "a"]);
    }

    #[test]
    fn more_than_one_instance_is_rejected() {
        let one = tempfile::tempdir().unwrap();
        let two = tempfile::tempdir().unwrap();
        write(one.path(), "a.tfm", "a: 1");
        let b = write(two.path(), "b.tfm", "b: 1");

        let err = load(&[arg(one.path()), arg(two.path())], &[], &LoadConfig::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::InstanceCount(2)));
        assert_eq!(err.to_string(), "must load exactly one instance; loaded 2");

        let err = load(&[arg(one.path()), arg(&b)], &[], &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::InstanceCount(2)));
    }

    #[test]
    fn empty_directory_has_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&[arg(dir.path())], &[], &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::NoFiles { .. }));
    }

    #[test]
    fn no_arguments_loads_the_current_directory() {
        // The package directory holds no inputs.
        let err = load(&[], &[], &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::NoFiles { dir } if dir == Path::new(".")));
    }

    #[test]
    fn json_is_placed_under_path_labels() {
        let dir = tempfile::tempdir().unwrap();
        let main = write(dir.path(), "main.tfm", "transforms: []");
        let data = write(dir.path(), "data.json", r#"{"b": 1, "a": [1, 2.5]}"#);

        let value = load(
            &[arg(&main), arg(&data)],
            &["data".to_string()],
            &LoadConfig::default(),
        )
        .unwrap();
        assert_eq!(labels(&value), vec!["transforms", "data"]);
        assert_eq!(labels(value.lookup(&path!["data"]).unwrap()), vec!["b", "a"]);
        assert_eq!(
            value.lookup(&path!["data", "a", 1usize]),
            Some(&Value::Float(2.5))
        );
    }

    #[test]
    fn bare_json_object_becomes_top_level_fields() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "input.json", r#"{"data": {"x": 1}, "transforms": []}"#);
        let value = load(&[arg(dir.path())], &[], &LoadConfig::default()).unwrap();
        assert_eq!(labels(&value), vec!["data", "transforms"]);
    }

    #[test]
    fn errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(dir.path(), "bad.tfm", "a: {");
        let err = load(&[arg(&bad)], &[], &LoadConfig::default()).unwrap_err();
        assert!(matches!(&err, LoadError::Parse { path, .. } if path == &bad));
        assert!(err.to_string().starts_with(&arg(&bad)));

        let missing = dir.path().join("missing.tfm");
        assert!(matches!(
            load(&[arg(&missing)], &[], &LoadConfig::default()),
            Err(LoadError::Io { .. })
        ));

        let other = write(dir.path(), "data.yaml", "a: 1");
        assert!(matches!(
            load(&[arg(&other)], &[], &LoadConfig::default()),
            Err(LoadError::UnsupportedFile { .. })
        ));
    }

    #[test]
    fn evaluation_errors_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "a.tfm", "a: nowhere");
        let err = load(&[arg(&file)], &[], &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::Eval(_)));
        assert_eq!(err.to_string(), "reference \"nowhere\" not found");
    }

    #[test]
    fn extensions_are_configurable() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.cfg", "a: 1");
        write(dir.path(), "b.tfm", "b: 2");
        let config = LoadConfig {
            source_extension: "cfg".into(),
            ..LoadConfig::default()
        };
        let value = load(&[arg(dir.path())], &[], &config).unwrap();
        assert_eq!(labels(&value), vec!["a"]);
    }
}
