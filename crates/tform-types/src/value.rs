//! The evaluated value tree.
//!
//! A [`Value`] is the result of evaluating a document. Containers preserve
//! declaration order. Struct fields additionally remember whether they were
//! declared as a reference to another location ([`Origin`]), which is what
//! lets a transform point at the data it edits.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NotConcrete;
use crate::path::{Path, Selector};

/// A type placeholder: a value of this kind, not yet known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Int,
    Float,
    Number,
    String,
    Bool,
}

impl Kind {
    /// Source keyword for this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Number => "number",
            Self::String => "string",
            Self::Bool => "bool",
        }
    }

    /// Parse a kind keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "bool" => Some(Self::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Where a field's value came from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    /// Declared directly (or by more than one declaration).
    #[default]
    Literal,
    /// Declared as a single reference to the given absolute path.
    Reference(Path),
}

impl Origin {
    /// The referenced path, if this field was declared as a reference.
    pub fn reference_path(&self) -> Option<&Path> {
        match self {
            Self::Literal => None,
            Self::Reference(path) => Some(path),
        }
    }
}

/// A labelled member of a [`Struct`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    pub value: Value,
    pub origin: Origin,
}

impl Field {
    /// A field declared directly.
    pub fn new(label: impl Into<String>, value: Value) -> Self {
        Self {
            label: label.into(),
            value,
            origin: Origin::Literal,
        }
    }

    /// A field declared as a reference to `target`.
    pub fn reference(label: impl Into<String>, value: Value, target: Path) -> Self {
        Self {
            label: label.into(),
            value,
            origin: Origin::Reference(target),
        }
    }
}

/// An ordered collection of uniquely labelled fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Struct {
    fields: Vec<Field>,
}

impl Struct {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by label.
    pub fn get(&self, label: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.label == label)
    }

    /// Look up a field's value by label.
    pub fn value(&self, label: &str) -> Option<&Value> {
        self.get(label).map(|f| &f.value)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Insert a field, replacing the value and origin of an existing field
    /// with the same label in place.
    pub fn insert(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.label == field.label) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Append a field known not to be present yet.
    pub fn push(&mut self, field: Field) {
        debug_assert!(!self.contains(&field.label), "duplicate label {}", field.label);
        self.fields.push(field);
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.label.as_str())
    }
}

impl FromIterator<Field> for Struct {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut s = Struct::new();
        for field in iter {
            s.insert(field);
        }
        s
    }
}

impl<'a> IntoIterator for &'a Struct {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// An evaluated value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Any value (`_`). Not concrete.
    Top,
    /// Any value of the given kind. Not concrete.
    Kind(Kind),
    /// An evaluation error carried in place of a value. Not concrete.
    Bottom(String),
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Struct(Struct),
    List(Vec<Value>),
}

impl Value {
    /// An empty struct.
    pub fn empty_struct() -> Self {
        Self::Struct(Struct::new())
    }

    /// Short kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Top => "_",
            Self::Kind(k) => k.keyword(),
            Self::Bottom(_) => "_|_",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Struct(_) => "struct",
            Self::List(_) => "list",
        }
    }

    /// Returns `true` for scalar leaves (concrete or not).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Struct(_) | Self::List(_))
    }

    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Select one child of this value.
    pub fn select(&self, selector: &Selector) -> Option<&Value> {
        match (self, selector) {
            (Self::Struct(s), Selector::Field(label)) => s.value(label),
            (Self::List(items), Selector::Index(i)) => items.get(*i),
            _ => None,
        }
    }

    /// The value at `path`, relative to this value.
    pub fn lookup(&self, path: &Path) -> Option<&Value> {
        path.selectors()
            .iter()
            .try_fold(self, |current, selector| current.select(selector))
    }

    /// Returns `true` if a value exists at `path`.
    pub fn exists(&self, path: &Path) -> bool {
        self.lookup(path).is_some()
    }

    /// The field at `path`, whose last selector must be a field label.
    pub fn field_at(&self, path: &Path) -> Option<&Field> {
        let (last, parent) = path.split_last()?;
        let Selector::Field(label) = last else {
            return None;
        };
        self.lookup(&parent)?.as_struct()?.get(label)
    }

    /// Check that this value is fully resolved: no `_`, no bare kinds and no
    /// bottom values anywhere below it.
    pub fn validate_concrete(&self) -> Result<(), NotConcrete> {
        let mut path = Path::root();
        validate_at(self, &mut path)
    }

    pub fn is_concrete(&self) -> bool {
        self.validate_concrete().is_ok()
    }
}

fn validate_at(value: &Value, path: &mut Path) -> Result<(), NotConcrete> {
    match value {
        Value::Top | Value::Kind(_) => Err(NotConcrete {
            path: path.clone(),
            reason: format!("incomplete value {}", value.kind_name()),
        }),
        Value::Bottom(message) => Err(NotConcrete {
            path: path.clone(),
            reason: message.clone(),
        }),
        Value::Struct(s) => {
            for field in s {
                path.push(Selector::Field(field.label.clone()));
                validate_at(&field.value, path)?;
                path.pop();
            }
            Ok(())
        }
        Value::List(items) => {
            for (i, item) in items.iter().enumerate() {
                path.push(Selector::Index(i));
                validate_at(item, path)?;
                path.pop();
            }
            Ok(())
        }
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    fn sample() -> Value {
        let inner: Struct = [Field::new(
            "b",
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
        )]
        .into_iter()
        .collect();
        let root: Struct = [
            Field::new("a", Value::Struct(inner)),
            Field::reference("r", Value::Int(2), path!["a", "b", 1usize]),
        ]
        .into_iter()
        .collect();
        Value::Struct(root)
    }

    #[test]
    fn lookup_walks_fields_and_indices() {
        let v = sample();
        assert_eq!(v.lookup(&path!["a", "b", 2usize]), Some(&Value::Int(3)));
        assert_eq!(v.lookup(&Path::root()), Some(&v));
        assert!(v.lookup(&path!["a", "b", 3usize]).is_none());
        assert!(v.lookup(&path!["a", 0usize]).is_none());
        assert!(v.exists(&path!["a", "b"]));
        assert!(!v.exists(&path!["missing"]));
    }

    #[test]
    fn field_at_exposes_origin() {
        let v = sample();
        let field = v.field_at(&path!["r"]).unwrap();
        assert_eq!(field.origin.reference_path(), Some(&path!["a", "b", 1usize]));
        assert_eq!(v.field_at(&path!["a"]).unwrap().origin, Origin::Literal);
        assert!(v.field_at(&path!["a", "b", 0usize]).is_none());
    }

    #[test]
    fn concrete_values_validate() {
        assert!(sample().is_concrete());
        assert!(Value::List(Vec::new()).is_concrete());
        assert!(Value::empty_struct().is_concrete());
    }

    #[test]
    fn incomplete_values_report_path() {
        let s: Struct = [
            Field::new("ok", Value::Int(1)),
            Field::new("x", Value::List(vec![Value::Null, Value::Kind(Kind::Int)])),
        ]
        .into_iter()
        .collect();
        let err = Value::Struct(s).validate_concrete().unwrap_err();
        assert_eq!(err.path, path!["x", 1usize]);
        assert_eq!(err.to_string(), "x[1]: incomplete value int");
    }

    #[test]
    fn bottom_reports_its_message() {
        let err = Value::Bottom("conflicting values 1 and 2".into())
            .validate_concrete()
            .unwrap_err();
        assert_eq!(err.to_string(), "conflicting values 1 and 2");
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut s = Struct::new();
        s.insert(Field::new("a", Value::Int(1)));
        s.insert(Field::new("b", Value::Int(2)));
        s.insert(Field::new("a", Value::Int(3)));
        assert_eq!(s.labels().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(s.value("a"), Some(&Value::Int(3)));
    }
}
