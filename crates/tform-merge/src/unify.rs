//! Structural unification of two values.
//!
//! Struct results keep the left operand's field order and append fields that
//! only the right operand declares. Lists are closed: both sides must have
//! the same length.

use tform_types::{Field, Kind, Path, Selector, Struct, Value};

use crate::error::{Conflict, MergeResult};

/// Unify `a` with `b`.
///
/// A bottom operand is carried through unchanged rather than reported, so
/// that the error it describes surfaces at the next concreteness check.
pub fn unify(a: &Value, b: &Value) -> MergeResult<Value> {
    let mut path = Path::root();
    unify_at(a, b, &mut path)
}

fn unify_at(a: &Value, b: &Value, path: &mut Path) -> MergeResult<Value> {
    match (a, b) {
        (Value::Bottom(_), _) => Ok(a.clone()),
        (_, Value::Bottom(_)) => Ok(b.clone()),
        (Value::Top, other) | (other, Value::Top) => Ok(other.clone()),
        (Value::Kind(k1), Value::Kind(k2)) => match intersect(*k1, *k2) {
            Some(kind) => Ok(Value::Kind(kind)),
            None => Err(Conflict::new(
                path,
                format!("conflicting values {k1} and {k2}"),
            )),
        },
        (Value::Kind(kind), v) | (v, Value::Kind(kind)) if v.is_scalar() => {
            if accepts(*kind, v) {
                Ok(v.clone())
            } else {
                Err(Conflict::new(
                    path,
                    format!(
                        "conflicting values {} and {kind} (mismatched types {} and {kind})",
                        describe(v),
                        v.kind_name()
                    ),
                ))
            }
        }
        (Value::Struct(left), Value::Struct(right)) => {
            unify_structs(left, right, path).map(Value::Struct)
        }
        (Value::List(left), Value::List(right)) => {
            if left.len() != right.len() {
                return Err(Conflict::new(
                    path,
                    format!(
                        "incompatible list lengths ({} and {})",
                        left.len(),
                        right.len()
                    ),
                ));
            }
            let mut items = Vec::with_capacity(left.len());
            for (i, (l, r)) in left.iter().zip(right).enumerate() {
                path.push(Selector::Index(i));
                items.push(unify_at(l, r, path)?);
                path.pop();
            }
            Ok(Value::List(items))
        }
        _ if a == b => Ok(a.clone()),
        _ if a.kind_name() == b.kind_name() => Err(Conflict::new(
            path,
            format!("conflicting values {} and {}", describe(a), describe(b)),
        )),
        _ => Err(Conflict::new(
            path,
            format!(
                "conflicting values {} and {} (mismatched types {} and {})",
                describe(a),
                describe(b),
                a.kind_name(),
                b.kind_name()
            ),
        )),
    }
}

fn unify_structs(left: &Struct, right: &Struct, path: &mut Path) -> MergeResult<Struct> {
    let mut out = Struct::new();
    for field in left {
        match right.get(&field.label) {
            Some(other) => {
                path.push(Selector::Field(field.label.clone()));
                let value = unify_at(&field.value, &other.value, path)?;
                path.pop();
                out.push(Field {
                    label: field.label.clone(),
                    value,
                    origin: field.origin.clone(),
                });
            }
            None => out.push(field.clone()),
        }
    }
    for field in right {
        if !left.contains(&field.label) {
            out.push(field.clone());
        }
    }
    Ok(out)
}

fn intersect(a: Kind, b: Kind) -> Option<Kind> {
    match (a, b) {
        _ if a == b => Some(a),
        (Kind::Number, k @ (Kind::Int | Kind::Float)) | (k @ (Kind::Int | Kind::Float), Kind::Number) => {
            Some(k)
        }
        _ => None,
    }
}

fn accepts(kind: Kind, value: &Value) -> bool {
    matches!(
        (kind, value),
        (Kind::Int, Value::Int(_))
            | (Kind::Float, Value::Float(_))
            | (Kind::Number, Value::Int(_) | Value::Float(_))
            | (Kind::String, Value::String(_))
            | (Kind::Bool, Value::Bool(_))
    )
}

/// Short rendering of a value for diagnostics.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Top => "_".into(),
        Value::Kind(kind) => kind.keyword().into(),
        Value::Bottom(_) => "_|_".into(),
        Value::Null => "null".into(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format!("{f:?}"),
        Value::String(s) => format!("{s:?}"),
        Value::Struct(s) if s.is_empty() => "{}".into(),
        Value::Struct(_) => "{...}".into(),
        Value::List(items) if items.is_empty() => "[]".into(),
        Value::List(_) => "[...]".into(),
    }
}
