//! Configuration options for SDN serialization.
//!
//! [`Format`] controls how a document is laid out as text:
//!
//! - `pretty`: one element per line with indentation, or a single line
//! - `indent`: spaces per nesting level (pretty mode only)
//! - `trailing_commas`: a comma after the last element of every container
//!   (pretty mode only; compact output never has trailing commas)
//!
//! ## Examples
//!
//! ```rust
//! use serde_sdn::{parse, serialize, Format};
//!
//! let doc = parse("{a: [1, 2]}").unwrap();
//!
//! assert_eq!(serialize(&doc, &Format::compact()), "a:[1,2]");
//!
//! let pretty = serialize(&doc, &Format::pretty().with_indent(4).with_trailing_commas(false));
//! assert_eq!(pretty, "a: [\n    1\n    2\n]\n");
//! ```

/// Layout options for [`serialize`](crate::serialize).
///
/// # Examples
///
/// ```rust
/// use serde_sdn::Format;
///
/// let format = Format::default();
/// assert!(format.pretty);
/// assert_eq!(format.indent, 2);
/// assert!(format.trailing_commas);
///
/// let compact = Format::compact();
/// assert!(!compact.pretty);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Format {
    pub pretty: bool,
    pub indent: usize,
    pub trailing_commas: bool,
}

impl Default for Format {
    fn default() -> Self {
        Format {
            pretty: true,
            indent: 2,
            trailing_commas: true,
        }
    }
}

impl Format {
    /// Creates default options (pretty, 2-space indent, trailing commas).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as [`Format::new`].
    #[must_use]
    pub fn pretty() -> Self {
        Self::default()
    }

    /// Single-line output with no insignificant whitespace.
    #[must_use]
    pub fn compact() -> Self {
        Format {
            pretty: false,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// Ignored when `pretty` is off.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_trailing_commas(mut self, trailing_commas: bool) -> Self {
        self.trailing_commas = trailing_commas;
        self
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
