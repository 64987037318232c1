//! JSON data files and `--path` labels.

use std::path::Path;

use serde_json::Value as Json;
use tform_syntax::{Expr, File};
use tform_types::is_identifier;

use crate::error::{LoadError, LoadResult};

/// Parse `--path` labels. Each is an identifier or a JSON-quoted string.
pub fn parse_labels(labels: &[String]) -> LoadResult<Vec<String>> {
    labels.iter().map(|label| parse_label(label)).collect()
}

fn parse_label(label: &str) -> LoadResult<String> {
    if is_identifier(label) {
        return Ok(label.to_string());
    }
    if label.starts_with('"') {
        if let Ok(text) = serde_json::from_str::<String>(label) {
            return Ok(text);
        }
    }
    Err(LoadError::InvalidLabel {
        label: label.to_string(),
    })
}

/// Read a JSON data file as a source file whose content is placed under
/// `labels`, outermost first. Without labels the JSON must be an object and
/// its members become top-level fields.
pub fn parse_json(path: &Path, text: &str, labels: &[String]) -> LoadResult<File> {
    let value: Json = serde_json::from_str(text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let expr = labels
        .iter()
        .rev()
        .fold(to_expr(value), |inner, label| {
            Expr::struct_of([(label.clone(), inner)])
        });
    match expr {
        Expr::Struct(decls) => Ok(File {
            name: path.display().to_string(),
            decls,
        }),
        _ => Err(LoadError::JsonNotObject {
            path: path.to_path_buf(),
        }),
    }
}

fn to_expr(value: Json) -> Expr {
    match value {
        Json::Null => Expr::Null,
        Json::Bool(b) => Expr::Bool(b),
        Json::Number(n) => n
            .as_i64()
            .map(Expr::Int)
            .or_else(|| n.as_f64().map(Expr::Float))
            .unwrap_or(Expr::Null),
        Json::String(s) => Expr::String(s),
        Json::Array(items) => Expr::List(items.into_iter().map(to_expr).collect()),
        Json::Object(members) => {
            Expr::struct_of(members.into_iter().map(|(key, value)| (key, to_expr(value))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tform_syntax::Decl;

    #[test]
    fn labels_accept_identifiers_and_quoted_strings() {
        let labels = parse_labels(&["data".into(), "\"x-y\"".into()]).unwrap();
        assert_eq!(labels, vec!["data", "x-y"]);
        assert!(matches!(
            parse_labels(&["a b".into()]),
            Err(LoadError::InvalidLabel { label }) if label == "a b"
        ));
        assert!(parse_labels(&["\"unterminated".into()]).is_err());
    }

    #[test]
    fn numbers_keep_their_kind() {
        let file = parse_json(Path::new("d.json"), r#"{"i": 2, "f": 2.0, "n": null}"#, &[]).unwrap();
        let values: Vec<_> = file
            .decls
            .iter()
            .map(|decl| match decl {
                Decl::Field(field) => field.value.clone(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(values, vec![Expr::Int(2), Expr::Float(2.0), Expr::Null]);
    }

    #[test]
    fn labels_wrap_outermost_first() {
        let file = parse_json(Path::new("d.json"), "[1]", &["a".into(), "b".into()]).unwrap();
        let Decl::Field(a) = &file.decls[0] else {
            panic!("expected field");
        };
        assert_eq!(a.label, "a");
        let Expr::Struct(inner) = &a.value else {
            panic!("expected struct");
        };
        assert!(matches!(&inner[0], Decl::Field(b) if b.label == "b" && b.value == Expr::List(vec![Expr::Int(1)])));
    }

    #[test]
    fn bare_json_must_be_an_object() {
        assert!(matches!(
            parse_json(Path::new("d.json"), "[1, 2]", &[]),
            Err(LoadError::JsonNotObject { .. })
        ));
        assert!(matches!(
            parse_json(Path::new("d.json"), "{", &[]),
            Err(LoadError::Json { .. })
        ));
    }
}
