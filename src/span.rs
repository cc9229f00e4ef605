//! Source positions.
//!
//! A [`Span`] marks where a token starts in the input: the absolute byte
//! offset plus a 1-indexed line and column. Every token carries one and
//! every [`Error`](crate::Error) reports one.

use std::fmt;

/// An immutable position in SDN source text.
///
/// # Examples
///
/// ```rust
/// use serde_sdn::Span;
///
/// let span = Span::new(12, 2, 5);
/// assert_eq!(span.to_string(), "2:5");
/// assert_eq!(Span::default(), Span::new(0, 1, 1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column, counted in characters.
    pub column: usize,
}

impl Span {
    #[must_use]
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Span {
            offset,
            line,
            column,
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::new(0, 1, 1)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
