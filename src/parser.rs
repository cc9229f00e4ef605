//! Recursive-descent SDN parser.
//!
//! The [`Parser`] holds one token of lookahead and builds a [`Document`]
//! in a single pass. The grammar, one method per production:
//!
//! ```text
//! Document       := Directive* TopLevel?
//! Directive      := '$' Name ':' Node ','?
//! TopLevel       := ImplicitObject | ValueStream
//! ImplicitObject := (Name ':' Node ','?)*
//! ValueStream    := (Node ','?)*
//! Node           := (Tag | Annotation)* Value
//! Tag            := '#' Name
//! Annotation     := '@' Name ( '(' (Value (',' Value)* ','?)? ')' )?
//! Value          := null | true | false | INT | FLOAT | STRING | TRIPLE_STRING
//!                 | d"…" | b"…" | u"…" | t"…" | r"…" | Array | Object
//! Array          := '[' (Node ','?)* ']'
//! Object         := '{' (Name ':' Node ','?)* '}'
//! Name           := IDENT | STRING | true | false | null
//! ```
//!
//! The only place that needs more than one token of lookahead is the choice
//! between an implicit top-level object and a value stream: if the first
//! token after the prolog is a name and the one after it is `:`, the rest of
//! the input is an implicit object. The parser snapshots the lexer cursor
//! and its buffered token, peeks, and restores the snapshot exactly.
//!
//! Parsing stops at the first error; there is no recovery.

use crate::lexer::{Lexer, Token, TokenKind, TypedPrefix};
use crate::{
    literal, Annotation, Directive, Document, Error, ErrorKind, Node, Result, SdnMap, Span, Tag,
    Value,
};

/// Deepest array/object nesting the parser accepts.
pub const MAX_DEPTH: usize = 128;

/// Everything needed to rewind the parser: the lexer cursor plus the
/// buffered lookahead token.
#[derive(Clone, Debug, PartialEq)]
struct Checkpoint {
    cursor: Span,
    current: Token,
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser and primes its lookahead token.
    ///
    /// # Errors
    ///
    /// Fails if the very first token cannot be lexed.
    pub fn new(src: &'a str) -> Result<Self> {
        let mut lexer = Lexer::new(src);
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            depth: 0,
        })
    }

    fn bump(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            cursor: self.lexer.cursor(),
            current: self.current.clone(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.lexer.reset(checkpoint.cursor);
        self.current = checkpoint.current;
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.current.kind == *kind
    }

    fn eat(&mut self, kind: &TokenKind) -> Result<bool> {
        if self.at(kind) {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Token> {
        if self.at(kind) {
            self.bump()
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        if self.at(&TokenKind::Eof) {
            Error::eof(self.current.span, &format!("expected {}", expected))
        } else {
            Error::expected(self.current.span, expected, &self.current.kind.to_string())
        }
    }

    /// Parses the whole input.
    pub fn parse_document(&mut self) -> Result<Document> {
        let mut doc = Document::new();
        while self.at(&TokenKind::Dollar) {
            doc.directives.push(self.parse_directive()?);
        }

        if self.implicit_object_ahead()? {
            tracing::debug!(at = %self.current.span, "top level is an implicit object");
            let entries = self.parse_entries(None)?;
            doc.values.push(Node::new(Value::Object(entries)));
        } else {
            tracing::debug!(at = %self.current.span, "top level is a value stream");
            while !self.at(&TokenKind::Eof) {
                doc.values.push(self.parse_node()?);
                self.eat(&TokenKind::Comma)?;
            }
        }
        Ok(doc)
    }

    fn parse_directive(&mut self) -> Result<Directive> {
        self.expect(&TokenKind::Dollar)?;
        let name = self.parse_name("a directive name")?;
        self.expect(&TokenKind::Colon)?;
        let value = self.parse_node()?;
        self.eat(&TokenKind::Comma)?;
        Ok(Directive { name, value })
    }

    /// Peeks two tokens ahead without moving: a name followed by `:`.
    fn implicit_object_ahead(&mut self) -> Result<bool> {
        if self.current.kind.as_name().is_none() {
            return Ok(false);
        }
        let checkpoint = self.checkpoint();
        let ahead = self.bump().map(|_| self.at(&TokenKind::Colon));
        self.restore(checkpoint);
        ahead
    }

    /// Parses `key: node` entries until `close` (or end of input when
    /// `close` is `None`). Repeated keys overwrite in place.
    fn parse_entries(&mut self, close: Option<&TokenKind>) -> Result<SdnMap> {
        let mut entries = SdnMap::new();
        while !self.at(close.unwrap_or(&TokenKind::Eof)) {
            let key = match close {
                Some(_) => self.parse_name("a key or `}`")?,
                None => self.parse_name("a key")?,
            };
            self.expect(&TokenKind::Colon)?;
            let node = self.parse_node()?;
            entries.insert(key, node);
            self.eat(&TokenKind::Comma)?;
        }
        Ok(entries)
    }

    fn parse_name(&mut self, expected: &str) -> Result<String> {
        match self.current.kind.as_name() {
            Some(name) => {
                let name = name.to_string();
                self.bump()?;
                Ok(name)
            }
            None => Err(self.unexpected(expected)),
        }
    }

    /// Parses decorations followed by a value.
    pub fn parse_node(&mut self) -> Result<Node> {
        let mut tags = Vec::new();
        let mut annotations = Vec::new();
        loop {
            match self.current.kind {
                TokenKind::Hash => {
                    self.bump()?;
                    tags.push(Tag::new(self.parse_name("a tag name")?));
                }
                TokenKind::At => annotations.push(self.parse_annotation()?),
                _ => break,
            }
        }
        let value = self.parse_value()?;
        Ok(Node {
            tags,
            annotations,
            value,
        })
    }

    fn parse_annotation(&mut self) -> Result<Annotation> {
        self.expect(&TokenKind::At)?;
        let name = self.parse_name("an annotation name")?;
        let mut args = Vec::new();
        if self.eat(&TokenKind::LParen)? {
            while !self.at(&TokenKind::RParen) {
                args.push(self.parse_value()?);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
            self.expect(&TokenKind::RParen)?;
        }
        Ok(Annotation { name, args })
    }

    /// Parses one undecorated value.
    pub fn parse_value(&mut self) -> Result<Value> {
        let span = self.current.span;
        let value = match &self.current.kind {
            TokenKind::Null => Value::Null,
            TokenKind::True => Value::Bool(true),
            TokenKind::False => Value::Bool(false),
            TokenKind::Int(i) => Value::Int(i.clone()),
            TokenKind::Float(f) => Value::Float(*f),
            TokenKind::String(s) | TokenKind::TripleString(s) => Value::String(s.clone()),
            TokenKind::Typed(prefix, body) => typed_literal(*prefix, body, span)?,
            TokenKind::LBracket => return self.parse_nested(Self::parse_array),
            TokenKind::LBrace => return self.parse_nested(Self::parse_object),
            _ => return Err(self.unexpected("a value")),
        };
        self.bump()?;
        Ok(value)
    }

    fn parse_nested(&mut self, parse: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth == MAX_DEPTH {
            return Err(Error::new(
                ErrorKind::Message,
                self.current.span,
                Some(format!("nesting too deep (limit {})", MAX_DEPTH)),
            ));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.expect(&TokenKind::LBracket)?;
        let mut items = Vec::new();
        while !self.at(&TokenKind::RBracket) {
            if self.at(&TokenKind::Eof) {
                return Err(self.unexpected("a value or `]`"));
            }
            items.push(self.parse_node()?);
            self.eat(&TokenKind::Comma)?;
        }
        self.bump()?;
        Ok(Value::Array(items))
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.expect(&TokenKind::LBrace)?;
        let entries = self.parse_entries(Some(&TokenKind::RBrace))?;
        self.bump()?;
        Ok(Value::Object(entries))
    }
}

/// Interprets a typed-string literal body.
fn typed_literal(prefix: TypedPrefix, body: &str, span: Span) -> Result<Value> {
    let fail = |kind| Error::invalid_literal(kind, span, body);
    Ok(match prefix {
        TypedPrefix::Decimal => Value::Decimal(body.to_string()),
        TypedPrefix::Duration => Value::Duration(body.to_string()),
        TypedPrefix::Bytes => Value::Bytes(literal::decode_bytes(body).map_err(fail)?),
        TypedPrefix::Uuid => Value::Uuid(literal::canonical_uuid(body).map_err(fail)?),
        TypedPrefix::DateTime => Value::DateTime(literal::parse_datetime(body).map_err(fail)?),
    })
}
