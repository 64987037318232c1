//! Document-level entry point.

use tform_types::{Selector, Struct, Value};

use crate::error::{TransformError, TransformResult};
use crate::interpreter::Interpreter;

/// Apply the `transforms` of an evaluated document to its `data` and return
/// the resulting data, which must be a struct.
pub fn apply_document(root: &Value) -> TransformResult<Struct> {
    let data = root
        .select(&Selector::field("data"))
        .ok_or(TransformError::MissingData)?;
    data.validate_concrete()
        .map_err(|source| TransformError::DataNotConcrete { source })?;

    let interpreter = Interpreter::default();
    let transforms = root
        .lookup(interpreter.transforms_path())
        .ok_or(TransformError::MissingTransforms)?;
    let Value::List(transforms) = transforms else {
        return Err(TransformError::TransformsNotList {
            found: transforms.kind_name(),
        });
    };

    tracing::debug!(count = transforms.len(), "applying transforms");
    match interpreter.apply(data.clone(), transforms)? {
        Value::Struct(result) => Ok(result),
        other => Err(TransformError::OutputNotStruct {
            found: other.kind_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tform_eval::{evaluate, EvalConfig};
    use tform_syntax::{format_file, parse_file};

    fn document(src: &str) -> Value {
        let file = parse_file("doc.tfm", src).unwrap();
        evaluate(&[file], &EvalConfig::default()).unwrap()
    }

    fn apply(src: &str) -> TransformResult<String> {
        apply_document(&document(src)).map(|data| format_file(&data))
    }

    #[test]
    fn deletes_through_a_guarded_reference() {
        let src = r#"
            let d = data
            data: a: b: [1, 2, 3]
            transforms: [{
                type: "delete"
                data: d
                if data.a.b[1] == 2 {
                    path: data.a.b[1]
                }
            }]
        "#;
        assert_eq!(apply(src).unwrap(), "a: {\n\tb: [1, 3]\n}\n");
    }

    #[test]
    fn unmet_guard_skips_the_delete() {
        let src = r#"
            let d = data
            data: a: b: [1, 2, 3]
            transforms: [{
                type: "delete"
                data: d
                if data.a.b[1] == 7 {
                    path: data.a.b[1]
                }
            }]
        "#;
        assert_eq!(apply(src).unwrap(), "a: {\n\tb: [1, 2, 3]\n}\n");
    }

    #[test]
    fn unify_adds_fields() {
        let src = r#"
            data: a: 1
            transforms: [{type: "unify", value: {b: 2}}]
        "#;
        assert_eq!(apply(src).unwrap(), "a: 1\nb: 2\n");
    }

    #[test]
    fn unify_conflict_fails() {
        let src = r#"
            data: x: 1
            transforms: [{type: "unify", value: x: 2}]
        "#;
        assert!(matches!(
            apply(src).unwrap_err(),
            TransformError::MergeConflict { .. }
        ));
    }

    #[test]
    fn unknown_type_fails() {
        let src = r#"
            data: x: 1
            transforms: [{type: "rename"}]
        "#;
        assert!(matches!(
            apply(src).unwrap_err(),
            TransformError::UnknownType { name, .. } if name == "rename"
        ));
    }

    #[test]
    fn delete_into_another_transform_is_out_of_scope() {
        let src = r#"
            let d = data
            data: a: 1
            transforms: [
                {type: "unify", value: {b: 2}, data: d},
                {type: "delete", data: d, path: transforms[0].data.a},
            ]
        "#;
        let err = apply(src).unwrap_err();
        assert_eq!(
            err.to_string(),
            "transforms[0].data.a is not a reference into transforms[1].data"
        );
    }

    #[test]
    fn transforms_see_the_original_data() {
        let src = r#"
            let d = data
            data: {keep: true, drop: [1, 2], gone: null}
            transforms: [
                {type: "delete", data: d, path: data.drop[0]},
                {type: "delete", data: d, path: data.gone},
                {type: "unify", value: added: "yes"},
            ]
        "#;
        assert_eq!(
            apply(src).unwrap(),
            "keep: true\ndrop: [2]\nadded: \"yes\"\n"
        );
    }

    #[test]
    fn transforms_can_be_bound_with_let() {
        let src = r#"
            let d = data
            data: {a: 1, b: 2}
            let dropA = {type: "delete", data: d, path: data.a}
            transforms: [dropA, {type: "unify", value: c: 3}]
        "#;
        assert_eq!(apply(src).unwrap(), "b: 2\nc: 3\n");
    }

    #[test]
    fn document_shape_is_checked() {
        assert_eq!(
            apply("transforms: []").unwrap_err(),
            TransformError::MissingData
        );
        assert_eq!(
            apply("data: {}").unwrap_err(),
            TransformError::MissingTransforms
        );
        assert!(matches!(
            apply("data: {}\ntransforms: {}").unwrap_err(),
            TransformError::TransformsNotList { found: "struct" }
        ));
        assert!(matches!(
            apply("data: {x: int}\ntransforms: []").unwrap_err(),
            TransformError::DataNotConcrete { .. }
        ));
        assert_eq!(
            apply("data: [1]\ntransforms: []").unwrap_err(),
            TransformError::OutputNotStruct { found: "list" }
        );
    }

    #[test]
    fn empty_transforms_return_data() {
        assert_eq!(apply("data: {a: [1, 2]}\ntransforms: []").unwrap(), "a: [1, 2]\n");
    }
}
