//! SDN tokenizer.
//!
//! The [`Lexer`] pulls one [`Token`] at a time out of the source text. Its
//! whole cursor state is a [`Span`] (byte offset, line, column), which the
//! parser snapshots and restores for its single point of lookahead.
//!
//! Typed-string literals (`d"…"`, `b"…"`, `u"…"`, `t"…"`, `r"…"`) are lexed
//! exactly like ordinary quoted strings and tagged with their [`TypedPrefix`];
//! interpreting the body is left to the parser.
//!
//! ```rust
//! use serde_sdn::lexer::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("key: 42 // answer");
//! assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Ident("key".to_string()));
//! assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Colon);
//! assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Int(42.into()));
//! assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
//! ```

use crate::{Error, Result, Span};
use num_bigint::BigInt;
use std::fmt;
use std::str::FromStr;

/// The one-letter prefix of a typed-string literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypedPrefix {
    /// `d"…"`
    Decimal,
    /// `b"…"`
    Bytes,
    /// `u"…"`
    Uuid,
    /// `t"…"`
    DateTime,
    /// `r"…"`
    Duration,
}

impl TypedPrefix {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            'd' => Some(TypedPrefix::Decimal),
            'b' => Some(TypedPrefix::Bytes),
            'u' => Some(TypedPrefix::Uuid),
            't' => Some(TypedPrefix::DateTime),
            'r' => Some(TypedPrefix::Duration),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            TypedPrefix::Decimal => 'd',
            TypedPrefix::Bytes => 'b',
            TypedPrefix::Uuid => 'u',
            TypedPrefix::DateTime => 't',
            TypedPrefix::Duration => 'r',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Colon,
    Comma,
    Dollar,
    Hash,
    At,
    True,
    False,
    Null,
    Ident(String),
    Int(BigInt),
    Float(f64),
    String(String),
    TripleString(String),
    Typed(TypedPrefix, String),
    Eof,
}

impl TokenKind {
    /// Returns the name text if this token can stand where an identifier or
    /// string is expected (keys, tag and annotation names, directive names).
    ///
    /// Keywords qualify too, so a key spelled `null` reads back as the string `"null"`.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(s) | TokenKind::String(s) => Some(s),
            TokenKind::True => Some("true"),
            TokenKind::False => Some("false"),
            TokenKind::Null => Some("null"),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LBrace => write!(f, "`{{`"),
            TokenKind::RBrace => write!(f, "`}}`"),
            TokenKind::LBracket => write!(f, "`[`"),
            TokenKind::RBracket => write!(f, "`]`"),
            TokenKind::LParen => write!(f, "`(`"),
            TokenKind::RParen => write!(f, "`)`"),
            TokenKind::Colon => write!(f, "`:`"),
            TokenKind::Comma => write!(f, "`,`"),
            TokenKind::Dollar => write!(f, "`$`"),
            TokenKind::Hash => write!(f, "`#`"),
            TokenKind::At => write!(f, "`@`"),
            TokenKind::True => write!(f, "`true`"),
            TokenKind::False => write!(f, "`false`"),
            TokenKind::Null => write!(f, "`null`"),
            TokenKind::Ident(s) => write!(f, "identifier `{}`", s),
            TokenKind::Int(i) => write!(f, "integer `{}`", i),
            TokenKind::Float(x) => write!(f, "float `{:?}`", x),
            TokenKind::String(_) => write!(f, "string"),
            TokenKind::TripleString(_) => write!(f, "triple-quoted string"),
            TokenKind::Typed(prefix, _) => write!(f, "`{}\"…\"` literal", prefix.as_char()),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Pull-based tokenizer over a borrowed source string.
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: Span,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Lexer {
            src,
            pos: Span::default(),
        }
    }

    /// Snapshot of the cursor state.
    #[must_use]
    pub fn cursor(&self) -> Span {
        self.pos
    }

    /// Restores a cursor previously returned by [`Lexer::cursor`].
    pub fn reset(&mut self, cursor: Span) {
        self.pos = cursor;
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos.offset..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// A sign only opens a number when a digit follows it, directly or
    /// after a single `.`.
    fn sign_starts_number(&self) -> bool {
        match self.peek_nth(1) {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.peek_nth(2).map_or(false, |c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos.offset += ch.len_utf8();
        if ch == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Some(ch)
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek_char().map_or(false, &pred) {
            self.bump();
        }
    }

    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    self.bump();
                }
                Some('/') if self.peek_nth(1) == Some('/') => {
                    self.bump_while(|c| c != '\n');
                }
                Some('/') if self.peek_nth(1) == Some('*') => {
                    let start = self.pos;
                    self.bump();
                    self.bump();
                    loop {
                        match self.bump() {
                            Some('*') if self.peek_char() == Some('/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                            None => return Err(Error::eof(start, "unterminated block comment")),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Returns the next token, or an [`TokenKind::Eof`] token forever once
    /// the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_trivia()?;
        let start = self.pos;
        let Some(ch) = self.peek_char() else {
            return Ok(Token::new(TokenKind::Eof, start));
        };

        let punct = match ch {
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            '[' => Some(TokenKind::LBracket),
            ']' => Some(TokenKind::RBracket),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            ':' => Some(TokenKind::Colon),
            ',' => Some(TokenKind::Comma),
            '$' => Some(TokenKind::Dollar),
            '#' => Some(TokenKind::Hash),
            '@' => Some(TokenKind::At),
            _ => None,
        };
        if let Some(kind) = punct {
            self.bump();
            return Ok(Token::new(kind, start));
        }

        let kind = match ch {
            '"' if self.rest().starts_with("\"\"\"") => self.lex_triple_string(start)?,
            '"' => {
                self.bump();
                TokenKind::String(self.lex_quoted_body(start)?)
            }
            c if c.is_ascii_digit() => self.lex_number(start)?,
            '.' if self.peek_nth(1).map_or(false, |c| c.is_ascii_digit()) => {
                self.lex_number(start)?
            }
            '+' | '-' if self.sign_starts_number() => {
                self.lex_number(start)?
            }
            c if c.is_ascii_alphabetic() || c == '_' => self.lex_word(start)?,
            other => return Err(Error::invalid_token(start, other)),
        };
        tracing::trace!(%kind, at = %start, "token");
        Ok(Token::new(kind, start))
    }

    fn lex_word(&mut self, start: Span) -> Result<TokenKind> {
        if let Some(prefix) = self.peek_char().and_then(TypedPrefix::from_char) {
            if self.peek_nth(1) == Some('"') {
                self.bump();
                self.bump();
                let body = self.lex_quoted_body(start)?;
                return Ok(TokenKind::Typed(prefix, body));
            }
        }

        self.bump_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        let word = &self.src[start.offset..self.pos.offset];
        Ok(match word {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => TokenKind::Ident(word.to_string()),
        })
    }

    fn lex_number(&mut self, start: Span) -> Result<TokenKind> {
        if matches!(self.peek_char(), Some('+' | '-')) {
            self.bump();
        }
        self.bump_while(|c| c.is_ascii_digit());

        let mut is_float = false;
        if self.peek_char() == Some('.') && self.peek_nth(1).map_or(false, |c| c.is_ascii_digit()) {
            is_float = true;
            self.bump();
            self.bump_while(|c| c.is_ascii_digit());
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_float = true;
            self.bump();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.bump();
            }
            self.bump_while(|c| c.is_ascii_digit());
        }

        let literal = &self.src[start.offset..self.pos.offset];
        let unsigned = literal.strip_prefix('+').unwrap_or(literal);
        if is_float {
            match f64::from_str(unsigned) {
                Ok(x) if x.is_finite() => Ok(TokenKind::Float(x)),
                _ => Err(Error::invalid_number(start, literal)),
            }
        } else {
            BigInt::from_str(unsigned)
                .map(TokenKind::Int)
                .map_err(|_| Error::invalid_number(start, literal))
        }
    }

    /// Lexes a `"…"` body; the opening quote (and any prefix) is already consumed.
    fn lex_quoted_body(&mut self, start: Span) -> Result<String> {
        let mut out = String::new();
        loop {
            let here = self.pos;
            match self.bump() {
                None => return Err(Error::eof(start, "unterminated string")),
                Some('"') => return Ok(out),
                Some('\\') => out.push(self.lex_escape(here)?),
                Some(c) => out.push(c),
            }
        }
    }

    fn lex_escape(&mut self, at: Span) -> Result<char> {
        let Some(ch) = self.bump() else {
            return Err(Error::eof(at, "unterminated string"));
        };
        Ok(match ch {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => {
                let unit = self.lex_hex4(at)?;
                match unit {
                    0xD800..=0xDBFF => {
                        if self.peek_char() != Some('\\') || self.peek_nth(1) != Some('u') {
                            return Err(Error::invalid_escape(at, "unpaired surrogate"));
                        }
                        self.bump();
                        self.bump();
                        let low = self.lex_hex4(at)?;
                        if !(0xDC00..=0xDFFF).contains(&low) {
                            return Err(Error::invalid_escape(at, "unpaired surrogate"));
                        }
                        let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                        char::from_u32(code)
                            .ok_or_else(|| Error::invalid_escape(at, "invalid code point"))?
                    }
                    0xDC00..=0xDFFF => {
                        return Err(Error::invalid_escape(at, "unpaired surrogate"));
                    }
                    _ => char::from_u32(unit)
                        .ok_or_else(|| Error::invalid_escape(at, "invalid code point"))?,
                }
            }
            other => {
                return Err(Error::invalid_escape(
                    at,
                    &format!("unknown escape `\\{}`", other.escape_default()),
                ))
            }
        })
    }

    fn lex_hex4(&mut self, at: Span) -> Result<u32> {
        let mut unit = 0u32;
        for _ in 0..4 {
            match self.bump() {
                Some(c) if c.is_ascii_hexdigit() => {
                    unit = unit * 16 + c.to_digit(16).unwrap_or(0);
                }
                Some(_) => {
                    return Err(Error::invalid_escape(
                        at,
                        "expected 4 hex digits after `\\u`",
                    ))
                }
                None => return Err(Error::eof(at, "unterminated string")),
            }
        }
        Ok(unit)
    }

    fn lex_triple_string(&mut self, start: Span) -> Result<TokenKind> {
        for _ in 0..3 {
            self.bump();
        }
        let Some(len) = self.rest().find("\"\"\"") else {
            return Err(Error::eof(start, "unterminated triple-quoted string"));
        };
        let end = self.pos.offset + len;
        let body = self.src[self.pos.offset..end].to_string();
        while self.pos.offset < end {
            self.bump();
        }
        for _ in 0..3 {
            self.bump();
        }
        Ok(TokenKind::TripleString(body))
    }
}

/// Yields tokens up to, but not including, the end-of-input token.
/// Stops after the first error.
impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Token {
                kind: TokenKind::Eof,
                ..
            }) => None,
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.pos.offset = self.src.len();
                Some(Err(err))
            }
        }
    }
}
