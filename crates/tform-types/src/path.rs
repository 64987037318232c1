//! Selectors and paths into a value tree.
//!
//! A [`Path`] is an ordered sequence of [`Selector`]s. Each selector is either
//! a field label or a list index; the two kinds never compare equal, so
//! `a[0]` and `a."0"` are distinct paths.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One component of a [`Path`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Selector {
    /// A struct field label.
    Field(String),
    /// A zero-based list index.
    Index(usize),
}

/// The kind of a [`Selector`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    Field,
    Index,
}

impl SelectorKind {
    /// The container kind a selector of this kind addresses.
    pub fn container_name(&self) -> &'static str {
        match self {
            Self::Field => "struct",
            Self::Index => "list",
        }
    }
}

impl Selector {
    /// Create a field selector.
    pub fn field(label: impl Into<String>) -> Self {
        Self::Field(label.into())
    }

    /// Create an index selector.
    pub fn index(index: usize) -> Self {
        Self::Index(index)
    }

    /// The kind of this selector.
    pub fn kind(&self) -> SelectorKind {
        match self {
            Self::Field(_) => SelectorKind::Field,
            Self::Index(_) => SelectorKind::Index,
        }
    }

    /// Returns `true` for a field selector.
    pub fn is_field(&self) -> bool {
        matches!(self, Self::Field(_))
    }

    /// Returns `true` for an index selector.
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(label) if is_identifier(label) => write!(f, "{label}"),
            Self::Field(label) => write!(f, "{}", quote(label)),
            Self::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// `s` as a JSON string literal, the quoting used for labels and strings
/// throughout tform's textual output.
pub fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"))
}

/// Returns `true` if `label` can be written without quotes.
///
/// Identifiers start with a letter, `_` or `$` and continue with letters,
/// digits, `_` or `$`. A lone `_` is not an identifier.
pub fn is_identifier(label: &str) -> bool {
    let mut chars = label.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if label == "_" {
        return false;
    }
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// An absolute or relative location in a value tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Path(Vec<Selector>);

impl Path {
    /// The empty path, addressing the root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from a sequence of selectors.
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self(selectors)
    }

    /// The selectors making up this path.
    pub fn selectors(&self) -> &[Selector] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The final selector, if any.
    pub fn last(&self) -> Option<&Selector> {
        self.0.last()
    }

    /// A new path with `selector` appended.
    pub fn child(&self, selector: Selector) -> Self {
        let mut selectors = Vec::with_capacity(self.0.len() + 1);
        selectors.extend_from_slice(&self.0);
        selectors.push(selector);
        Self(selectors)
    }

    /// Append a selector in place.
    pub fn push(&mut self, selector: Selector) {
        self.0.push(selector);
    }

    /// Remove and return the final selector.
    pub fn pop(&mut self) -> Option<Selector> {
        self.0.pop()
    }

    /// Split into the final selector and the path leading to it.
    pub fn split_last(&self) -> Option<(&Selector, Path)> {
        let (last, rest) = self.0.split_last()?;
        Some((last, Path(rest.to_vec())))
    }

    /// The path without its final selector. The root is its own parent.
    pub fn parent(&self) -> Path {
        match self.0.split_last() {
            Some((_, rest)) => Path(rest.to_vec()),
            None => Path::root(),
        }
    }

    /// Returns `true` if `prefix` matches the leading selectors of this path,
    /// position for position. Every path starts with itself and with the root.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Returns `true` if this path lies strictly below `ancestor`: it is
    /// longer and starts with it.
    pub fn is_strict_descendant_of(&self, ancestor: &Path) -> bool {
        self.len() > ancestor.len() && self.starts_with(ancestor)
    }

    /// The non-empty remainder of this path below `ancestor`, or `None` when
    /// this path is not a strict descendant of it.
    pub fn strip_strict_prefix(&self, ancestor: &Path) -> Option<Path> {
        if !self.is_strict_descendant_of(ancestor) {
            return None;
        }
        Some(Path(self.0[ancestor.len()..].to_vec()))
    }

    /// A new path with all of `other`'s selectors appended.
    pub fn join(&self, other: &Path) -> Path {
        let mut selectors = self.0.clone();
        selectors.extend_from_slice(&other.0);
        Path(selectors)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        for (i, selector) in self.0.iter().enumerate() {
            if i > 0 && selector.is_field() {
                write!(f, ".")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

impl From<Vec<Selector>> for Path {
    fn from(selectors: Vec<Selector>) -> Self {
        Self(selectors)
    }
}

impl FromIterator<Selector> for Path {
    fn from_iter<I: IntoIterator<Item = Selector>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Selector;
    type IntoIter = std::slice::Iter<'a, Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build a [`Path`] from field labels and indices.
///
/// ```
/// use tform_types::path;
///
/// let p = path!["transforms", 0usize, "data"];
/// assert_eq!(p.to_string(), "transforms[0].data");
/// ```
#[macro_export]
macro_rules! path {
    ($($sel:expr),* $(,)?) => {
        $crate::Path::new(vec![$($crate::Selector::from($sel)),*])
    };
}

impl From<&str> for Selector {
    fn from(label: &str) -> Self {
        Self::Field(label.to_string())
    }
}

impl From<String> for Selector {
    fn from(label: String) -> Self {
        Self::Field(label)
    }
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}
