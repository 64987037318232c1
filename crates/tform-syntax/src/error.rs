//! Parser error types.

use crate::ast::Span;

/// A lexing or parsing error with location information.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{}", located(.span, .message))]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    pub fn unexpected_token(span: Span, expected: &str, found: &str) -> Self {
        Self::new(format!("expected {expected}, found {found}"), span)
    }
}

fn located(span: &Span, message: &str) -> String {
    format!("line {}, column {}: {message}", span.line, span.column)
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
