//! Container rebuilding.
//!
//! Containers are never edited in place: every edit produces a fresh list or
//! struct holding copies of the untouched elements in their original order.
//! Lists come out indexed contiguously from 0.

use tform_types::{Field, Path, Selector, Struct, Value};

/// What happens to the selected element.
#[derive(Clone, Debug, PartialEq)]
pub enum Edit {
    Remove,
    Replace(Value),
}

impl Edit {
    fn into_replacement(self) -> Option<Value> {
        match self {
            Self::Remove => None,
            Self::Replace(value) => Some(value),
        }
    }
}

/// Why a container could not be rebuilt.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RebuildError {
    /// Nothing exists at the given path.
    #[error("nothing at {0}")]
    Missing(Path),

    /// The value at `container` is not the kind of container the selector
    /// addresses.
    #[error("expected {expected} at path {container}, found {found}")]
    Shape {
        container: Path,
        expected: &'static str,
        found: &'static str,
    },
}

/// Copy `original` with the element at `index` removed or replaced.
pub fn rebuild_list(original: &[Value], index: usize, edit: Edit) -> Vec<Value> {
    let mut replacement = edit.into_replacement();
    let mut items = Vec::with_capacity(original.len());
    for (i, item) in original.iter().enumerate() {
        if i != index {
            items.push(item.clone());
        } else if let Some(value) = replacement.take() {
            items.push(value);
        }
    }
    items
}

/// Copy `original` with the field `label` removed or given a new value.
/// A replaced field keeps its position and origin.
pub fn rebuild_struct(original: &Struct, label: &str, edit: Edit) -> Struct {
    let mut replacement = edit.into_replacement();
    let mut out = Struct::new();
    for field in original {
        if field.label != label {
            out.push(field.clone());
        } else if let Some(value) = replacement.take() {
            out.push(Field {
                label: field.label.clone(),
                value,
                origin: field.origin.clone(),
            });
        }
    }
    out
}

/// Rebuild `container` around the element `selector` addresses. Field
/// selectors require a struct and index selectors a list.
pub fn rebuild(container: &Value, selector: &Selector, edit: Edit) -> Result<Value, RebuildError> {
    match (container, selector) {
        (Value::List(items), Selector::Index(index)) => {
            Ok(Value::List(rebuild_list(items, *index, edit)))
        }
        (Value::Struct(fields), Selector::Field(label)) => {
            Ok(Value::Struct(rebuild_struct(fields, label, edit)))
        }
        _ => Err(RebuildError::Shape {
            container: Path::root(),
            expected: selector.kind().container_name(),
            found: container.kind_name(),
        }),
    }
}

/// Remove the element at `target` from `root` and rebuild every enclosing
/// container up to the root.
///
/// Works from the innermost container outwards: each step replaces the
/// element just left with the container rebuilt in the step before.
pub fn remove_path(root: &Value, target: &Path) -> Result<Value, RebuildError> {
    let Some((last, mut container)) = target.split_last() else {
        return Err(RebuildError::Missing(target.clone()));
    };
    if !root.exists(target) {
        return Err(RebuildError::Missing(target.clone()));
    }

    let mut accum = rebuild_at(root, &container, last, Edit::Remove)?;
    while let Some(selector) = container.pop() {
        accum = rebuild_at(root, &container, &selector, Edit::Replace(accum))?;
    }
    Ok(accum)
}

fn rebuild_at(
    root: &Value,
    container: &Path,
    selector: &Selector,
    edit: Edit,
) -> Result<Value, RebuildError> {
    let value = root
        .lookup(container)
        .ok_or_else(|| RebuildError::Missing(container.clone()))?;
    rebuild(value, selector, edit).map_err(|err| match err {
        RebuildError::Shape {
            expected, found, ..
        } => RebuildError::Shape {
            container: container.clone(),
            expected,
            found,
        },
        other => other,
    })
}
