//! # serde_sdn
//!
//! A parser and serializer for SDN (Semantic Data Notation), with a Serde
//! bridge to and from Rust types.
//!
//! ## What is SDN?
//!
//! SDN is a superset of JSON's data model meant for hand-written
//! configuration and data files. On top of JSON it adds:
//!
//! - **Comments**: `//` line comments and `/* … */` block comments
//! - **Relaxed syntax**: unquoted identifier keys, optional and trailing commas
//! - **Implicit top level**: a file can be a bare `key: value` list with no braces
//! - **Typed literals**: decimals `d"1.10"`, bytes `b"aGk="`, UUIDs `u"…"`,
//!   timestamps `t"2024-01-15T10:30:00Z"` and durations `r"PT1H"`
//! - **Triple-quoted strings**: `"""` raw, multi-line text with no escapes
//! - **Decorations**: tags `#name` and annotations `@name(args)` in front of
//!   any value
//! - **Prolog directives**: `$name: value` entries before the content
//! - **Arbitrary-precision integers**
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_sdn::{parse, serialize, Format};
//!
//! let text = r#"
//! $schema: "https://example.com/service.json"
//!
//! // service definition
//! name: "billing"
//! id: u"123e4567-e89b-12d3-a456-426614174000"
//! timeout: r"PT30S"
//! routes: [
//!     #public @rate_limit(100) "/invoices",
//!     #internal "/admin",
//! ]
//! "#;
//!
//! let doc = parse(text).unwrap();
//! assert_eq!(doc.directives.len(), 1);
//!
//! let root = doc.root().unwrap();
//! let routes = root.get("routes").and_then(|n| n.as_array()).unwrap();
//! assert!(routes[0].has_tag("public"));
//! assert_eq!(routes[0].annotation("rate_limit").unwrap().args[0].as_i64(), Some(100));
//!
//! // Parsing the serialized form gives back the same document.
//! let again = parse(&serialize(&doc, &Format::compact())).unwrap();
//! assert_eq!(doc, again);
//! ```
//!
//! ### Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_sdn::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id: 123,\nname: \"Alice\",\nactive: true,\n");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! Decorations and directives are not visible through Serde; use [`parse`]
//! and the [`Document`] tree to read them.
//!
//! ### Dynamic Values with sdn! Macro
//!
//! ```rust
//! use serde_sdn::sdn;
//!
//! let data = sdn!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "serde"]
//! });
//! assert_eq!(data.get("name").and_then(|n| n.as_str()), Some("Alice"));
//! ```
//!
//! ## Logging
//!
//! The parser and serializer emit `tracing` events (`debug` for document
//! level progress, `trace` per token). Install any subscriber to see them.

pub mod de;
pub mod document;
pub mod error;
pub mod lexer;
mod literal;
pub mod macros;
pub mod map;
pub mod node;
pub mod options;
pub mod parser;
pub mod ser;
pub mod span;
pub mod value;

pub use de::{from_value, ValueDeserializer};
pub use document::{Directive, Document};
pub use error::{Error, ErrorKind, Result};
pub use map::SdnMap;
pub use node::{Annotation, Node, Tag};
pub use options::Format;
pub use parser::Parser;
pub use ser::{serialize, to_value, Serializer, ValueSerializer};
pub use span::Span;
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parses SDN text into a [`Document`].
///
/// # Examples
///
/// ```rust
/// use serde_sdn::parse;
///
/// let doc = parse("a: 1, b: [true, null]").unwrap();
/// assert_eq!(doc.values.len(), 1);
///
/// let err = parse("a: [1, 2").unwrap_err();
/// assert_eq!(err.to_string(), "unexpected end of input: expected a value or `]` at 1:9");
/// ```
///
/// # Errors
///
/// Returns the first lexical, syntactic or typed-literal error, with the
/// position where it was found.
pub fn parse(text: &str) -> Result<Document> {
    tracing::debug!(len = text.len(), "parsing document");
    let doc = Parser::new(text)?.parse_document()?;
    tracing::debug!(
        directives = doc.directives.len(),
        values = doc.values.len(),
        "parsed document"
    );
    Ok(doc)
}

/// Serializes any `T: Serialize` to SDN text using the default (pretty)
/// [`Format`].
///
/// # Errors
///
/// Returns an error if the value cannot be represented, such as a map with
/// non-string keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_format(value, &Format::default())
}

/// Serializes any `T: Serialize` to SDN text with a custom [`Format`].
///
/// # Examples
///
/// ```rust
/// use serde_sdn::{to_string_with_format, Format};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let text = to_string_with_format(&Point { x: 1, y: 2 }, &Format::compact()).unwrap();
/// assert_eq!(text, "x:1,y:2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_format<T>(value: &T, format: &Format) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let doc = Document::from_value(to_value(value)?);
    Ok(serialize(&doc, format))
}

/// Serializes any `T: Serialize` to a writer using the default [`Format`].
///
/// # Examples
///
/// ```rust
/// use serde_sdn::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec![1, 2]).unwrap();
/// assert_eq!(buffer, b"[\n  1,\n  2,\n],\n");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_format(writer, value, &Format::default())
}

/// Serializes any `T: Serialize` to a writer with a custom [`Format`].
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_format<W, T>(mut writer: W, value: &T, format: &Format) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_format(value, format)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e))?;
    Ok(())
}

/// Deserializes a `T` from SDN text.
///
/// The document's top level collapses as in [`Document::into_root_value`]:
/// an implicit object or single value is the root, a stream of several
/// values is an array.
///
/// # Examples
///
/// ```rust
/// use serde_sdn::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1 // first\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
///
/// let stream: Vec<i32> = from_str("1 2 3").unwrap();
/// assert_eq!(stream, [1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid SDN (with line and column) or
/// does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(parse(s)?.into_root_value())
}

/// Deserializes a `T` from an I/O stream of SDN text.
///
/// # Examples
///
/// ```rust
/// use serde_sdn::from_reader;
/// use std::collections::BTreeMap;
/// use std::io::Cursor;
///
/// let map: BTreeMap<String, bool> = from_reader(Cursor::new(b"on: true, off: false")).unwrap();
/// assert_eq!(map["on"], true);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid SDN, or the
/// data does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e))?;
    from_str(&string)
}

/// Deserializes a `T` from bytes of SDN text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid SDN, or do
/// not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(Error::custom)?;
    from_str(s)
}
