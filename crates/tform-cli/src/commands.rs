use tform_eval::EvalConfig;
use tform_load::{load, LoadConfig};
use tform_syntax::format_file;
use tform_transform::apply_document;
use tform_types::Struct;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Apply(args) => cmd_apply(args),
    }
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let data = apply(&args)?;
    print!("{}", format_file(&data));
    Ok(())
}

/// Load the instance named by `args` and run its transforms.
fn apply(args: &ApplyArgs) -> anyhow::Result<Struct> {
    let config = LoadConfig {
        eval: EvalConfig {
            max_depth: args.max_depth,
        },
        ..LoadConfig::default()
    };
    let root = load(&args.args, &args.path, &config)?;
    let data = apply_document(&root)?;
    tracing::debug!(fields = data.len(), "transforms applied");
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn apply_args(args: Vec<String>, path: &[&str]) -> ApplyArgs {
        ApplyArgs {
            args,
            path: path.iter().map(|s| s.to_string()).collect(),
            max_depth: 512,
        }
    }

    fn write(dir: &Path, name: &str, text: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path.display().to_string()
    }

    #[test]
    fn applies_a_document_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "doc.tfm",
            r#"
            let d = data
            data: a: b: [1, 2, 3]
            transforms: [{type: "delete", data: d, path: data.a.b[1]}]
            "#,
        );
        let args = apply_args(vec![dir.path().display().to_string()], &[]);
        let out = format_file(&apply(&args).unwrap());
        assert_eq!(out, "a: {\n\tb: [1, 3]\n}\n");
    }

    #[test]
    fn json_data_is_placed_under_labels() {
        let dir = tempfile::tempdir().unwrap();
        let json = write(dir.path(), "in.json", r#"{"name": "x", "tags": ["a", "b"]}"#);
        let doc = write(
            dir.path(),
            "doc.tfm",
            r#"
            let d = data
            transforms: [
                {type: "delete", data: d, path: data.tags[0]},
                {type: "unify", value: {version: 2}},
            ]
            "#,
        );
        let args = apply_args(vec![doc, json], &["data"]);
        let out = format_file(&apply(&args).unwrap());
        assert_eq!(out, "name: \"x\"\ntags: [\"b\"]\nversion: 2\n");
    }

    #[test]
    fn failures_carry_the_transform_path() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write(
            dir.path(),
            "doc.tfm",
            r#"
            data: x: 1
            transforms: [{type: "rename"}]
            "#,
        );
        let err = apply(&apply_args(vec![doc], &[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "transforms[0]: don't know how to handle transform type \"rename\""
        );
    }

    #[test]
    fn two_directories_are_rejected() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write(a.path(), "a.tfm", "data: {}\ntransforms: []");
        write(b.path(), "b.tfm", "data: {}\ntransforms: []");
        let args = apply_args(
            vec![a.path().display().to_string(), b.path().display().to_string()],
            &[],
        );
        let err = apply(&args).unwrap_err();
        assert_eq!(err.to_string(), "must load exactly one instance; loaded 2");
    }
}
