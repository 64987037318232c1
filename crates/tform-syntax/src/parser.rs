//! Recursive-descent parser for tform source text.
//!
//! Operator precedence, lowest first:
//! - Unification: `&`
//! - Logical: `||`, then `&&`
//! - Comparison: `==`, `!=`, `<`, `<=`, `>`, `>=` (non-associative)
//! - Unary: `!`, `-`
//! - Primary: literals, `_`, kinds, references, `( )`, structs, lists

use tform_types::{Kind, Selector};

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, Token, TokenKind};

/// How deeply expressions, struct bodies and guards may nest.
pub const MAX_NESTING: usize = 128;

/// Parse a complete source file.
pub fn parse_file(name: impl Into<String>, input: &str) -> ParseResult<File> {
    let mut parser = Parser::new(input)?;
    let decls = parser.parse_decls(&TokenKind::Eof)?;
    parser.expect(&TokenKind::Eof)?;
    Ok(File {
        name: name.into(),
        decls,
    })
}

/// Parse a single expression, such as a `-l` label or a test fixture.
pub fn parse_expr(input: &str) -> ParseResult<Expr> {
    let mut parser = Parser::new(input)?;
    let expr = parser.parse_expr()?;
    parser.expect(&TokenKind::Eof)?;
    Ok(expr)
}

/// Parser state.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Create a new parser from source text.
    pub fn new(input: &str) -> ParseResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self {
            tokens,
            pos: 0,
            depth: 0,
        })
    }

    // ==================== TOKEN HELPERS ====================

    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn peek_nth(&self, n: usize) -> &TokenKind {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)].kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&kind.name()))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError::unexpected_token(token.span, expected, &token.kind.name())
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::new(
                format!("nesting exceeds {MAX_NESTING} levels"),
                self.peek().span,
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ==================== DECLARATIONS ====================

    /// Parse declarations up to (not including) `end`.
    fn parse_decls(&mut self, end: &TokenKind) -> ParseResult<Vec<Decl>> {
        let mut decls = Vec::new();
        while !self.check(end) {
            decls.push(self.parse_decl()?);
            if !self.eat(&TokenKind::Comma) && !self.check(end) {
                // Newline-separated declarations need no comma; anything else
                // must start a new declaration.
                if !self.at_decl_start() {
                    return Err(self.unexpected("',' or a new declaration"));
                }
            }
        }
        Ok(decls)
    }

    fn at_decl_start(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Ident(_) | TokenKind::String(_)
        ) || self.peek().kind.keyword_text().is_some()
    }

    fn parse_decl(&mut self) -> ParseResult<Decl> {
        let span = self.peek().span;
        let is_label = matches!(self.peek_nth(1), TokenKind::Colon);
        let kind = self.peek().kind.clone();
        match kind {
            TokenKind::Let if !is_label => {
                self.advance();
                let name = match self.advance().kind {
                    TokenKind::Ident(name) => name,
                    other => {
                        return Err(ParseError::unexpected_token(
                            span,
                            "identifier after 'let'",
                            &other.name(),
                        ))
                    }
                };
                self.expect(&TokenKind::Assign)?;
                let value = self.parse_expr()?;
                Ok(Decl::Let(LetDecl { name, value, span }))
            }
            TokenKind::If if !is_label => {
                self.advance();
                let condition = self.parse_expr()?;
                self.expect(&TokenKind::LBrace)?;
                let body = self.nested(|p| p.parse_decls(&TokenKind::RBrace))?;
                self.expect(&TokenKind::RBrace)?;
                Ok(Decl::Guard(GuardDecl {
                    condition,
                    body,
                    span,
                }))
            }
            _ => self.parse_field().map(Decl::Field),
        }
    }

    /// `label: value` or the shorthand `a: b: value`.
    fn parse_field(&mut self) -> ParseResult<FieldDecl> {
        let span = self.peek().span;
        if let Some(word) = self.bare_keyword() {
            return Err(ParseError::new(
                format!("'{word}' must be quoted to be used as a label"),
                span,
            ));
        }
        let label = self.parse_label()?;
        self.expect(&TokenKind::Colon)?;

        let nested = self.at_decl_start() && matches!(self.peek_nth(1), TokenKind::Colon);
        let value = if nested {
            Expr::Struct(vec![Decl::Field(self.nested(Self::parse_field)?)])
        } else {
            self.parse_expr()?
        };
        Ok(FieldDecl { label, value, span })
    }

    /// The upcoming token, if it is a keyword or kind name that cannot
    /// stand as a declared label without quotes.
    fn bare_keyword(&self) -> Option<String> {
        match &self.peek().kind {
            TokenKind::Ident(name) if Kind::from_keyword(name).is_some() => Some(name.clone()),
            kind => kind.keyword_text().map(str::to_string),
        }
    }

    /// A label after `.` in a reference; keywords are accepted here.
    fn parse_label(&mut self) -> ParseResult<String> {
        let token = self.peek().clone();
        let label = match &token.kind {
            TokenKind::Ident(name) => name.clone(),
            TokenKind::String(s) => s.clone(),
            kind => match kind.keyword_text() {
                Some(text) => text.to_string(),
                None => return Err(self.unexpected("field label")),
            },
        };
        self.advance();
        Ok(label)
    }

    // ==================== EXPRESSIONS ====================

    /// Parse an expression.
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.nested(Self::parse_unify)
    }

    fn parse_unify(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_or()?;
        while self.eat(&TokenKind::Amp) {
            let right = self.parse_or()?;
            left = Expr::Binary(BinaryOp::Unify, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::OrOr) {
            let right = self.parse_and()?;
            left = Expr::Binary(BinaryOp::Or, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_comparison()?;
        while self.eat(&TokenKind::AndAnd) {
            let right = self.parse_comparison()?;
            left = Expr::Binary(BinaryOp::And, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let left = self.parse_unary()?;
        let op = match self.peek().kind {
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_unary()?;
        Ok(Expr::Binary(op, Box::new(left), Box::new(right)))
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        if self.eat(&TokenKind::Bang) {
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Expr::Unary(UnaryOp::Not, Box::new(operand)));
        }
        if self.eat(&TokenKind::Minus) {
            return Ok(match self.nested(Self::parse_unary)? {
                Expr::Int(i) => Expr::Int(-i),
                Expr::Float(f) => Expr::Float(-f),
                operand => Expr::Unary(UnaryOp::Neg, Box::new(operand)),
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.advance();
        match token.kind {
            TokenKind::Null => Ok(Expr::Null),
            TokenKind::True => Ok(Expr::Bool(true)),
            TokenKind::False => Ok(Expr::Bool(false)),
            TokenKind::Int(i) => Ok(Expr::Int(i)),
            TokenKind::Float(f) => Ok(Expr::Float(f)),
            TokenKind::String(s) => Ok(Expr::String(s)),
            TokenKind::Underscore => Ok(Expr::Top),
            TokenKind::Ident(name) => match Kind::from_keyword(&name) {
                Some(kind) => Ok(Expr::Kind(kind)),
                None => self.parse_reference(name, token.span).map(Expr::Ref),
            },
            TokenKind::LParen => {
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::LBrace => {
                let decls = self.parse_decls(&TokenKind::RBrace)?;
                self.expect(&TokenKind::RBrace)?;
                Ok(Expr::Struct(decls))
            }
            TokenKind::LBracket => {
                let mut items = Vec::new();
                while !self.check(&TokenKind::RBracket) {
                    items.push(self.parse_expr()?);
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(&TokenKind::RBracket)?;
                Ok(Expr::List(items))
            }
            other => Err(ParseError::unexpected_token(
                token.span,
                "expression",
                &other.name(),
            )),
        }
    }

    /// Selectors following a reference head: `.label`, `[index]`, `["label"]`.
    fn parse_reference(&mut self, head: String, span: Span) -> ParseResult<Reference> {
        let mut selectors = Vec::new();
        loop {
            if self.eat(&TokenKind::Dot) {
                selectors.push(Selector::Field(self.parse_label()?));
            } else if self.check(&TokenKind::LBracket) {
                self.advance();
                let token = self.advance();
                let selector = match token.kind {
                    TokenKind::Int(i) if i >= 0 => Selector::Index(i as usize),
                    TokenKind::String(s) => Selector::Field(s),
                    other => {
                        return Err(ParseError::unexpected_token(
                            token.span,
                            "non-negative index or quoted label",
                            &other.name(),
                        ))
                    }
                };
                self.expect(&TokenKind::RBracket)?;
                selectors.push(selector);
            } else {
                break;
            }
        }
        Ok(Reference {
            head,
            selectors,
            span,
        })
    }
}
