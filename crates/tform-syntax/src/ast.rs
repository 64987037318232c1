//! Abstract syntax tree for tform documents.

use serde::{Deserialize, Serialize};
use tform_types::{Kind, Selector};

/// Source location of a token or declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// A parsed source file: the declarations of an implicit top-level struct.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct File {
    /// Name the file was loaded from, for diagnostics.
    pub name: String,
    pub decls: Vec<Decl>,
}

/// A member of a struct body.
#[derive(Clone, Debug, PartialEq)]
pub enum Decl {
    /// `label: expr`
    Field(FieldDecl),
    /// `let name = expr`
    Let(LetDecl),
    /// `if condition { decls }`
    Guard(GuardDecl),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDecl {
    pub label: String,
    pub value: Expr,
    pub span: Span,
}

impl FieldDecl {
    pub fn new(label: impl Into<String>, value: Expr) -> Self {
        Self {
            label: label.into(),
            value,
            span: Span::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LetDecl {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GuardDecl {
    pub condition: Expr,
    pub body: Vec<Decl>,
    pub span: Span,
}

/// A reference: an identifier followed by field and index selectors.
#[derive(Clone, Debug, PartialEq)]
pub struct Reference {
    pub head: String,
    pub selectors: Vec<Selector>,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// `&`
    Unify,
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Unify => "&",
            Self::Or => "||",
            Self::And => "&&",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

/// An expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// `_`
    Top,
    Kind(Kind),
    Struct(Vec<Decl>),
    List(Vec<Expr>),
    Ref(Reference),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// A struct literal from `(label, value)` pairs.
    pub fn struct_of(fields: impl IntoIterator<Item = (String, Expr)>) -> Self {
        Self::Struct(
            fields
                .into_iter()
                .map(|(label, value)| Decl::Field(FieldDecl::new(label, value)))
                .collect(),
        )
    }

    /// Returns `true` if this expression is a single reference.
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Ref(_))
    }
}
