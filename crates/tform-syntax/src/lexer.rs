//! Lexer (tokenizer) for tform source text.

use crate::ast::Span;
use crate::error::{ParseError, ParseResult};

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords
    Let,
    If,
    Null,
    True,
    False,

    // Literals
    Ident(String),
    Int(i64),
    Float(f64),
    String(String),
    /// A lone `_`
    Underscore,

    // Symbols
    LBrace,   // {
    RBrace,   // }
    LBracket, // [
    RBracket, // ]
    LParen,   // (
    RParen,   // )
    Comma,    // ,
    Colon,    // :
    Dot,      // .
    Assign,   // =
    EqEq,     // ==
    NotEq,    // !=
    Lt,       // <
    LtEq,     // <=
    Gt,       // >
    GtEq,     // >=
    Amp,      // &
    AndAnd,   // &&
    OrOr,     // ||
    Bang,     // !
    Minus,    // -

    Eof,
}

impl TokenKind {
    pub fn name(&self) -> String {
        match self {
            Self::Let => "'let'".into(),
            Self::If => "'if'".into(),
            Self::Null => "'null'".into(),
            Self::True => "'true'".into(),
            Self::False => "'false'".into(),
            Self::Ident(name) => format!("identifier {name}"),
            Self::Int(i) => format!("integer {i}"),
            Self::Float(f) => format!("float {f}"),
            Self::String(s) => format!("string {s:?}"),
            Self::Underscore => "'_'".into(),
            Self::LBrace => "'{'".into(),
            Self::RBrace => "'}'".into(),
            Self::LBracket => "'['".into(),
            Self::RBracket => "']'".into(),
            Self::LParen => "'('".into(),
            Self::RParen => "')'".into(),
            Self::Comma => "','".into(),
            Self::Colon => "':'".into(),
            Self::Dot => "'.'".into(),
            Self::Assign => "'='".into(),
            Self::EqEq => "'=='".into(),
            Self::NotEq => "'!='".into(),
            Self::Lt => "'<'".into(),
            Self::LtEq => "'<='".into(),
            Self::Gt => "'>'".into(),
            Self::GtEq => "'>='".into(),
            Self::Amp => "'&'".into(),
            Self::AndAnd => "'&&'".into(),
            Self::OrOr => "'||'".into(),
            Self::Bang => "'!'".into(),
            Self::Minus => "'-'".into(),
            Self::Eof => "end of input".into(),
        }
    }

    /// The label text of a keyword token, which is allowed as a field label.
    pub fn keyword_text(&self) -> Option<&'static str> {
        match self {
            Self::Let => Some("let"),
            Self::If => Some("if"),
            Self::Null => Some("null"),
            Self::True => Some("true"),
            Self::False => Some("false"),
            _ => None,
        }
    }
}

/// A token with its span.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize all input into a vector of tokens ending with `Eof`.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.pos = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    /// Skip whitespace and `//` line comments.
    fn skip_trivia(&mut self) -> ParseResult<()> {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else if c == '/' {
                let (start, line, col) = (self.pos, self.line, self.column);
                self.next_char();
                if !self.eat('/') {
                    return Err(ParseError::new(
                        "unexpected character '/'",
                        self.span_from(start, line, col),
                    ));
                }
                while let Some(c) = self.peek_char() {
                    if c == '\n' {
                        break;
                    }
                    self.next_char();
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_trivia()?;

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let Some(c) = self.next_char() else {
            return Ok(Token::new(
                TokenKind::Eof,
                Span::new(self.pos, self.pos, self.line, self.column),
            ));
        };

        let kind = match c {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            '=' => {
                if self.eat('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.eat('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                if self.eat('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.eat('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '&' => {
                if self.eat('&') {
                    TokenKind::AndAnd
                } else {
                    TokenKind::Amp
                }
            }
            '|' => {
                if self.eat('|') {
                    TokenKind::OrOr
                } else {
                    return Err(ParseError::new(
                        "unexpected character '|'",
                        self.span_from(start, start_line, start_col),
                    ));
                }
            }
            '"' => self.scan_string(start, start_line, start_col)?,
            '0'..='9' => self.scan_number(c, start, start_line, start_col)?,
            c if c.is_ascii_alphabetic() || c == '_' || c == '$' => self.scan_ident(c),
            _ => {
                return Err(ParseError::new(
                    format!("unexpected character '{c}'"),
                    self.span_from(start, start_line, start_col),
                ));
            }
        };

        Ok(Token::new(kind, self.span_from(start, start_line, start_col)))
    }

    fn scan_string(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut value = String::new();

        loop {
            match self.next_char() {
                None | Some('\n') => {
                    return Err(ParseError::new(
                        "unterminated string literal",
                        self.span_from(start, start_line, start_col),
                    ));
                }
                Some('"') => break,
                Some('\\') => {
                    let escaped = match self.next_char() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('\\') => '\\',
                        Some('"') => '"',
                        Some('/') => '/',
                        Some('u') => self.scan_unicode_escape(start, start_line, start_col)?,
                        Some(c) => {
                            return Err(ParseError::new(
                                format!("invalid escape sequence '\\{c}'"),
                                self.span_from(start, start_line, start_col),
                            ));
                        }
                        None => {
                            return Err(ParseError::new(
                                "unterminated escape sequence",
                                self.span_from(start, start_line, start_col),
                            ));
                        }
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }

        Ok(TokenKind::String(value))
    }

    fn scan_unicode_escape(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<char> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .next_char()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| {
                    ParseError::new(
                        "invalid unicode escape",
                        self.span_from(start, start_line, start_col),
                    )
                })?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| {
            ParseError::new(
                format!("invalid unicode code point {code:#x}"),
                self.span_from(start, start_line, start_col),
            )
        })
    }

    fn scan_number(
        &mut self,
        first: char,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut text = String::new();
        text.push(first);
        let mut is_float = false;

        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                text.push(c);
                self.next_char();
            } else if c == '.' && !is_float {
                // Only a decimal point when a digit follows; `a[0].b` is a selector.
                let mut ahead = self.chars.clone();
                ahead.next();
                if !ahead.peek().is_some_and(|(_, d)| d.is_ascii_digit()) {
                    break;
                }
                is_float = true;
                text.push(c);
                self.next_char();
            } else if c == 'e' || c == 'E' {
                is_float = true;
                text.push(c);
                self.next_char();
                if let Some(sign @ ('+' | '-')) = self.peek_char() {
                    text.push(sign);
                    self.next_char();
                }
            } else {
                break;
            }
        }

        let span = self.span_from(start, start_line, start_col);
        if is_float {
            match text.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(TokenKind::Float(f)),
                Ok(_) => Err(ParseError::new(format!("number out of range '{text}'"), span)),
                Err(_) => Err(ParseError::new(format!("invalid number '{text}'"), span)),
            }
        } else {
            text.parse::<i64>()
                .map(TokenKind::Int)
                .map_err(|_| ParseError::new(format!("integer out of range '{text}'"), span))
        }
    }

    fn scan_ident(&mut self, first: char) -> TokenKind {
        let mut ident = String::new();
        ident.push(first);

        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                ident.push(c);
                self.next_char();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "_" => TokenKind::Underscore,
            "let" => TokenKind::Let,
            "if" => TokenKind::If,
            "null" => TokenKind::Null,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Ident(ident),
        }
    }
}
