//! The transform interpreter.

use tform_merge::{describe, unify};
use tform_types::{Field, Path, Selector, Value};

use crate::error::{TransformError, TransformResult};
use crate::rebuild::{remove_path, RebuildError};

/// A decoded transform descriptor.
#[derive(Clone, Copy, Debug)]
enum Transform<'t> {
    /// `type: "delete"`, with its optional `path` field.
    Delete { path: Option<&'t Field> },
    /// `type: "unify"`, with its `value` if present.
    Unify { value: Option<&'t Value> },
}

impl<'t> Transform<'t> {
    fn decode(descriptor: &'t Value, at: &Path) -> TransformResult<Self> {
        let Value::Struct(fields) = descriptor else {
            return Err(TransformError::MalformedTransform {
                path: at.clone(),
                found: descriptor.kind_name(),
            });
        };
        let kind = fields
            .value("type")
            .ok_or_else(|| TransformError::MissingType { path: at.clone() })?;
        let name = kind.as_str().ok_or_else(|| TransformError::TypeNotString {
            path: at.clone(),
            found: describe(kind),
        })?;
        match name {
            "delete" => Ok(Self::Delete {
                path: fields.get("path"),
            }),
            "unify" => Ok(Self::Unify {
                value: fields.value("value"),
            }),
            other => Err(TransformError::UnknownType {
                path: at.clone(),
                name: other.to_string(),
            }),
        }
    }
}

/// Applies transform descriptors to data, in order.
///
/// The interpreter owns the current data and replaces it wholesale after
/// each transform.
#[derive(Clone, Debug)]
pub struct Interpreter {
    transforms_path: Path,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Path::root().child(Selector::field("transforms")))
    }
}

impl Interpreter {
    /// An interpreter for descriptors found at `transforms_path` in the
    /// document. Delete references are checked against this location.
    pub fn new(transforms_path: Path) -> Self {
        Self { transforms_path }
    }

    /// Where the transform descriptors live in the document.
    pub fn transforms_path(&self) -> &Path {
        &self.transforms_path
    }

    /// Apply `transforms` to `data`, failing on the first error.
    pub fn apply(&self, data: Value, transforms: &[Value]) -> TransformResult<Value> {
        let mut data = data;
        for (index, descriptor) in transforms.iter().enumerate() {
            let at = self.transforms_path.child(Selector::Index(index));
            data = match Transform::decode(descriptor, &at)? {
                Transform::Delete { path } => self.delete(data, path, &at)?,
                Transform::Unify { value } => self.unify(data, value, &at)?,
            };
            data.validate_concrete()
                .map_err(|source| TransformError::NonConcreteResult {
                    path: at.clone(),
                    source,
                })?;
        }
        Ok(data)
    }

    fn delete(&self, data: Value, path: Option<&Field>, at: &Path) -> TransformResult<Value> {
        let Some(field) = path else {
            tracing::debug!(transform = %at, "delete has no path; skipping");
            return Ok(data);
        };
        let reference = field
            .origin
            .reference_path()
            .ok_or_else(|| TransformError::NotAReference { path: at.clone() })?;

        let scope = at.child(Selector::field("data"));
        let target = reference.strip_strict_prefix(&scope).ok_or_else(|| {
            TransformError::ReferenceOutOfScope {
                reference: reference.clone(),
                scope: scope.clone(),
            }
        })?;

        let result = remove_path(&data, &target).map_err(|err| match err {
            RebuildError::Missing(_) => TransformError::DeleteTargetMissing {
                path: at.clone(),
                target: target.clone(),
            },
            RebuildError::Shape {
                container,
                expected,
                found,
            } => TransformError::ContainerShape {
                path: at.clone(),
                container,
                expected,
                found,
            },
        })?;
        tracing::debug!(transform = %at, target = %target, "deleted");
        Ok(result)
    }

    fn unify(&self, data: Value, value: Option<&Value>, at: &Path) -> TransformResult<Value> {
        let value = value.ok_or_else(|| TransformError::MissingValue { path: at.clone() })?;
        value
            .validate_concrete()
            .map_err(|source| TransformError::ValueNotConcrete {
                path: at.clone(),
                source,
            })?;
        let result = unify(&data, value).map_err(|source| TransformError::MergeConflict {
            path: at.clone(),
            source,
        })?;
        tracing::debug!(transform = %at, "unified");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tform_types::{path, Struct};

    fn strukt(fields: Vec<(&str, Value)>) -> Value {
        Value::Struct(
            fields
                .into_iter()
                .map(|(label, value)| Field::new(label, value))
                .collect(),
        )
    }

    fn ints(values: &[i64]) -> Value {
        Value::List(values.iter().copied().map(Value::Int).collect())
    }

    fn delete(target: Path) -> Value {
        let fields: Struct = [
            Field::new("type", Value::String("delete".into())),
            Field::reference("path", Value::Null, target),
        ]
        .into_iter()
        .collect();
        Value::Struct(fields)
    }

    fn unify_with(value: Value) -> Value {
        strukt(vec![("type", Value::String("unify".into())), ("value", value)])
    }

    fn run(data: Value, transforms: Vec<Value>) -> TransformResult<Value> {
        Interpreter::default().apply(data, &transforms)
    }

    #[test]
    fn deletes_list_element() {
        let data = strukt(vec![("a", strukt(vec![("b", ints(&[1, 2, 3]))]))]);
        let out = run(data, vec![delete(path!["transforms", 0usize, "data", "a", "b", 1usize])]).unwrap();
        assert_eq!(out, strukt(vec![("a", strukt(vec![("b", ints(&[1, 3]))]))]));
    }

    #[test]
    fn deleting_sole_elements_leaves_empty_containers() {
        let data = strukt(vec![("l", ints(&[9])), ("s", strukt(vec![("x", Value::Null)]))]);
        let out = run(
            data,
            vec![
                delete(path!["transforms", 0usize, "data", "l", 0usize]),
                delete(path!["transforms", 1usize, "data", "s", "x"]),
            ],
        )
        .unwrap();
        assert_eq!(
            out,
            strukt(vec![("l", Value::List(Vec::new())), ("s", Value::empty_struct())])
        );
    }

    #[test]
    fn delete_without_path_is_a_no_op() {
        let data = strukt(vec![("a", Value::Int(1))]);
        let transform = strukt(vec![("type", Value::String("delete".into()))]);
        assert_eq!(run(data.clone(), vec![transform]).unwrap(), data);
    }

    #[test]
    fn delete_path_must_be_a_reference() {
        let data = strukt(vec![("a", Value::Int(1))]);
        let transform = strukt(vec![
            ("type", Value::String("delete".into())),
            ("path", Value::String("a".into())),
        ]);
        assert_eq!(
            run(data, vec![transform]).unwrap_err(),
            TransformError::NotAReference {
                path: path!["transforms", 0usize]
            }
        );
    }

    #[test]
    fn delete_outside_own_data_is_rejected() {
        let data = strukt(vec![("a", Value::Int(1))]);
        for target in [
            path!["data", "a"],
            path!["transforms", 1usize, "data", "a"],
            path!["transforms", 0usize, "data"],
            path!["transforms", 0usize, "value", "a"],
        ] {
            let err = run(data.clone(), vec![delete(target.clone())]).unwrap_err();
            assert_eq!(
                err,
                TransformError::ReferenceOutOfScope {
                    reference: target,
                    scope: path!["transforms", 0usize, "data"],
                }
            );
        }
        let err = run(data, vec![delete(path!["data", "a"])]).unwrap_err();
        assert_eq!(err.to_string(), "data.a is not a reference into transforms[0].data");
    }

    #[test]
    fn delete_target_must_exist() {
        let data = strukt(vec![("a", ints(&[1]))]);
        let err = run(data, vec![delete(path!["transforms", 0usize, "data", "a", 3usize])]).unwrap_err();
        assert_eq!(
            err,
            TransformError::DeleteTargetMissing {
                path: path!["transforms", 0usize],
                target: path!["a", 3usize],
            }
        );
    }

    #[test]
    fn shifted_indices_surface_as_missing_targets() {
        let data = strukt(vec![("xs", ints(&[1, 2]))]);
        let err = run(
            data,
            vec![
                delete(path!["transforms", 0usize, "data", "xs", 0usize]),
                delete(path!["transforms", 1usize, "data", "xs", 1usize]),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::DeleteTargetMissing { .. }));
    }

    #[test]
    fn unify_merges_concrete_values() {
        let data = strukt(vec![("a", Value::Int(1))]);
        let out = run(data, vec![unify_with(strukt(vec![("b", Value::Int(2))]))]).unwrap();
        assert_eq!(out, strukt(vec![("a", Value::Int(1)), ("b", Value::Int(2))]));
    }

    #[test]
    fn unify_conflicts_are_reported() {
        let data = strukt(vec![("x", Value::Int(1))]);
        let err = run(data, vec![unify_with(strukt(vec![("x", Value::Int(2))]))]).unwrap_err();
        assert!(matches!(err, TransformError::MergeConflict { .. }));
        assert_eq!(err.to_string(), "transforms[0]: x: conflicting values 1 and 2");
    }

    #[test]
    fn unify_value_must_exist_and_be_concrete() {
        let data = strukt(vec![("x", Value::Int(1))]);
        let missing = strukt(vec![("type", Value::String("unify".into()))]);
        assert!(matches!(
            run(data.clone(), vec![missing]).unwrap_err(),
            TransformError::MissingValue { .. }
        ));
        let open = unify_with(strukt(vec![("y", Value::Top)]));
        assert!(matches!(
            run(data, vec![open]).unwrap_err(),
            TransformError::ValueNotConcrete { .. }
        ));
    }

    #[test]
    fn transform_types_are_checked() {
        let data = Value::empty_struct();
        let err = run(data.clone(), vec![strukt(vec![("type", Value::String("rename".into()))])]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "transforms[0]: don't know how to handle transform type \"rename\""
        );
        assert!(matches!(
            run(data.clone(), vec![strukt(vec![("type", Value::Int(1))])]).unwrap_err(),
            TransformError::TypeNotString { .. }
        ));
        assert!(matches!(
            run(data.clone(), vec![Value::empty_struct()]).unwrap_err(),
            TransformError::MissingType { .. }
        ));
        assert!(matches!(
            run(data, vec![Value::Int(3)]).unwrap_err(),
            TransformError::MalformedTransform { found: "int", .. }
        ));
    }

    #[test]
    fn stops_at_first_error() {
        let data = strukt(vec![("x", Value::Int(1))]);
        let err = run(
            data,
            vec![
                unify_with(strukt(vec![("y", Value::Int(2))])),
                strukt(vec![("type", Value::String("bogus".into()))]),
                unify_with(strukt(vec![("x", Value::Int(5))])),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::UnknownType { path, .. } if path == path!["transforms", 1usize]));
    }

    #[test]
    fn empty_transform_list_returns_data_unchanged() {
        let data = strukt(vec![("a", ints(&[1, 2]))]);
        assert_eq!(run(data.clone(), Vec::new()).unwrap(), data);
    }

    proptest! {
        #[test]
        fn list_delete_removes_exactly_one(values in proptest::collection::vec(any::<i64>(), 1..8), seed in any::<usize>()) {
            let index = seed % values.len();
            let data = strukt(vec![("xs", ints(&values))]);
            let out = run(data, vec![delete(path!["transforms", 0usize, "data", "xs", index])]).unwrap();

            let mut expected = values.clone();
            expected.remove(index);
            prop_assert_eq!(out, strukt(vec![("xs", ints(&expected))]));
        }

        #[test]
        fn struct_delete_keeps_other_fields(
            entries in proptest::collection::btree_map("[a-f]", any::<i64>(), 1..6),
            seed in any::<usize>(),
        ) {
            let labels: Vec<String> = entries.keys().cloned().collect();
            let removed = labels[seed % labels.len()].clone();
            let fields: Vec<(&str, Value)> = entries
                .iter()
                .map(|(label, value)| (label.as_str(), Value::Int(*value)))
                .collect();
            let data = strukt(vec![("s", strukt(fields.clone()))]);

            let out = run(data, vec![delete(path!["transforms", 0usize, "data", "s", removed.as_str()])]).unwrap();

            let kept: Vec<(&str, Value)> = fields.into_iter().filter(|(label, _)| *label != removed).collect();
            prop_assert_eq!(out, strukt(vec![("s", strukt(kept))]));
        }
    }
}
