//! Error types for SDN parsing and serialization.
//!
//! Every failure carries three things:
//!
//! - an [`ErrorKind`] from a closed taxonomy
//! - the [`Span`] of the offending token or literal
//! - optional free-text context (for example the token that was expected)
//!
//! The rendered message always ends with the position, `"<message> at <line>:<column>"`,
//! so it can be used to put an editor cursor on the fault.
//!
//! ## Examples
//!
//! ```rust
//! use serde_sdn::{parse, ErrorKind};
//!
//! let err = parse("key: u\"not-a-uuid\"").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidUuid);
//! assert_eq!(err.span().column, 6);
//! assert!(err.to_string().ends_with("at 1:6"));
//! ```

use crate::Span;
use std::fmt;
use thiserror::Error;

/// The closed set of things that can go wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// Input ended inside a string or comment, or where a token was required.
    #[error("unexpected end of input")]
    Eof,

    /// A character that starts no valid token.
    #[error("invalid token")]
    InvalidToken,

    /// A specific token was required but another one was found.
    #[error("unexpected token")]
    Expected,

    /// A malformed `\` sequence in a quoted string.
    #[error("invalid escape sequence")]
    InvalidEscape,

    /// A numeric literal that does not parse as its declared kind.
    #[error("invalid number")]
    InvalidNumber,

    #[error("invalid decimal literal")]
    InvalidDecimal,

    #[error("invalid datetime literal")]
    InvalidDateTime,

    #[error("invalid duration literal")]
    InvalidDuration,

    #[error("invalid uuid literal")]
    InvalidUuid,

    #[error("invalid base64 literal")]
    InvalidBase64,

    /// Anything else; the context carries the whole message.
    #[error("error")]
    Message,
}

/// An SDN error: kind, position and optional context.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at {span}")]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    context: Option<String>,
    message: String,
}

impl Error {
    /// Creates an error of the given kind with an optional context string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sdn::{Error, ErrorKind, Span};
    ///
    /// let err = Error::new(ErrorKind::InvalidNumber, Span::new(4, 1, 5), Some("1e".to_string()));
    /// assert_eq!(err.to_string(), "invalid number: 1e at 1:5");
    /// ```
    pub fn new(kind: ErrorKind, span: Span, context: Option<String>) -> Self {
        let message = match (&context, kind) {
            (Some(ctx), ErrorKind::Message | ErrorKind::Expected) => ctx.clone(),
            (Some(ctx), _) => format!("{}: {}", kind, ctx),
            (None, _) => kind.to_string(),
        };
        Error {
            kind,
            span,
            context,
            message,
        }
    }

    /// Unexpected end of input while `what` was still open or required.
    pub fn eof(span: Span, what: &str) -> Self {
        Error::new(ErrorKind::Eof, span, Some(what.to_string()))
    }

    pub fn invalid_token(span: Span, ch: char) -> Self {
        Error::new(
            ErrorKind::InvalidToken,
            span,
            Some(format!("unexpected character `{}`", ch.escape_default())),
        )
    }

    /// A token mismatch, rendered as "expected `X`, found `Y`".
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sdn::{Error, Span};
    ///
    /// let err = Error::expected(Span::new(3, 1, 4), "`:`", "`}`");
    /// assert_eq!(err.to_string(), "expected `:`, found `}` at 1:4");
    /// ```
    pub fn expected(span: Span, expected: &str, found: &str) -> Self {
        Error::new(
            ErrorKind::Expected,
            span,
            Some(format!("expected {}, found {}", expected, found)),
        )
    }

    pub fn invalid_escape(span: Span, context: &str) -> Self {
        Error::new(ErrorKind::InvalidEscape, span, Some(context.to_string()))
    }

    pub fn invalid_number(span: Span, literal: &str) -> Self {
        Error::new(ErrorKind::InvalidNumber, span, Some(literal.to_string()))
    }

    /// A typed-string literal whose body fails its type-specific check.
    pub fn invalid_literal(kind: ErrorKind, span: Span, body: &str) -> Self {
        Error::new(kind, span, Some(format!("{:?}", body)))
    }

    /// Creates a generic error with a display message and no position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sdn::{Error, ErrorKind};
    ///
    /// let err = Error::custom("something went wrong");
    /// assert_eq!(err.kind(), ErrorKind::Message);
    /// assert_eq!(err.to_string(), "something went wrong at 1:1");
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::new(ErrorKind::Message, Span::default(), Some(msg.to_string()))
    }

    /// Wraps an I/O failure from the reader and writer conveniences.
    pub fn io(err: &std::io::Error) -> Self {
        Error::new(
            ErrorKind::Message,
            Span::default(),
            Some(format!("I/O error: {}", err)),
        )
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// The message without the trailing position.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::custom(msg)
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::custom(msg)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
