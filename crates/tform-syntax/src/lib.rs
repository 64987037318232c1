//! Document language for tform.
//!
//! This crate turns source text into an [`ast::File`] and turns evaluated
//! [`Value`](tform_types::Value)s back into source text:
//! - [`parse_file`] -- Lexing and parsing with line/column diagnostics
//! - [`format_file`] / [`format_value`] -- Canonical textual output

pub mod ast;
pub mod error;
pub mod format;
mod lexer;
mod parser;

pub use ast::{BinaryOp, Decl, Expr, FieldDecl, File, GuardDecl, LetDecl, Reference, Span, UnaryOp};
pub use error::{ParseError, ParseResult};
pub use format::{format_file, format_label, format_value};
pub use parser::{parse_expr, parse_file, Parser, MAX_NESTING};
