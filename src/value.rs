//! The SDN value model.
//!
//! [`Value`] is the closed set of things an SDN literal can denote. Containers
//! hold [`Node`]s rather than bare values, because every element and every
//! object entry may carry its own tags and annotations.
//!
//! ## Core Types
//!
//! - [`Value`]: null, bool, arbitrary-precision int, float, decimal, string,
//!   bytes, datetime, duration, uuid, array and object
//! - [`SdnMap`]: the ordered object map
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_sdn::Value;
//!
//! let null = Value::Null;
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//! let id = Value::uuid("123E4567-E89B-12D3-A456-426614174000").unwrap();
//! assert_eq!(id.as_str(), Some("123e4567-e89b-12d3-a456-426614174000"));
//! ```
//!
//! ### Reading and Editing Objects
//!
//! ```rust
//! use serde_sdn::{parse, Node};
//!
//! let mut doc = parse("{a: 1, b: 2, c: 3}").unwrap();
//! let obj = &mut doc.values[0];
//! obj.set("b", Node::from(20)).unwrap();
//! obj.set("d", Node::from(4)).unwrap();
//!
//! let keys: Vec<_> = obj.keys().collect();
//! assert_eq!(keys, ["a", "b", "c", "d"]);
//! assert_eq!(obj.get("b").and_then(|n| n.as_i64()), Some(20));
//! ```
//!
//! ### Unwrapping to Native Data
//!
//! `Value` implements `serde::Serialize`, producing the plain tree with
//! decorations dropped, so any serde format can consume it:
//!
//! ```rust
//! use serde_sdn::parse;
//!
//! let doc = parse("#tagged {name: \"Alice\", tags: [\"a\", \"b\"]}").unwrap();
//! let json = serde_json::to_string(&doc.values[0]).unwrap();
//! assert_eq!(json, r#"{"name":"Alice","tags":["a","b"]}"#);
//! ```

use crate::{literal, Error, ErrorKind, Node, Result, SdnMap, Span};
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use std::fmt;

/// Any SDN value.
///
/// The variant set is closed; code that consumes values matches on it
/// exhaustively.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// Unbounded integer; never narrowed or converted to a float.
    Int(BigInt),
    Float(f64),
    /// Exact source text of a `d"…"` literal.
    Decimal(String),
    String(String),
    Bytes(Vec<u8>),
    /// Only years 0000 through 9999 have an RFC3339 spelling; build these
    /// with [`Value::datetime`] to have the range checked.
    DateTime(DateTime<Utc>),
    /// Exact source text of an `r"…"` ISO8601 duration.
    Duration(String),
    /// Canonical lowercase hyphenated form.
    Uuid(String),
    Array(Vec<Node>),
    Object(SdnMap),
}

impl Value {
    /// A decimal literal, kept as exact text.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::InvalidDecimal`] unless `text` looks like
    /// `[+-]digits[.digits][e[+-]digits]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sdn::{Value, ErrorKind};
    ///
    /// assert_eq!(Value::decimal("19.990").unwrap(), Value::Decimal("19.990".to_string()));
    /// assert_eq!(Value::decimal("abc").unwrap_err().kind(), ErrorKind::InvalidDecimal);
    /// ```
    pub fn decimal(text: &str) -> Result<Value> {
        if literal::is_decimal(text) {
            Ok(Value::Decimal(text.to_string()))
        } else {
            Err(Error::invalid_literal(
                ErrorKind::InvalidDecimal,
                Span::default(),
                text,
            ))
        }
    }

    /// An ISO8601 duration, kept as exact text.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::InvalidDuration`] when `text` is not a
    /// `P…` duration.
    pub fn duration(text: &str) -> Result<Value> {
        if literal::is_duration(text) {
            Ok(Value::Duration(text.to_string()))
        } else {
            Err(Error::invalid_literal(
                ErrorKind::InvalidDuration,
                Span::default(),
                text,
            ))
        }
    }

    /// A UUID, canonicalized to lowercase.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::InvalidUuid`] unless `text` has the
    /// 8-4-4-4-12 hex-digit shape.
    pub fn uuid(text: &str) -> Result<Value> {
        literal::canonical_uuid(text)
            .map(Value::Uuid)
            .map_err(|kind| Error::invalid_literal(kind, Span::default(), text))
    }

    /// A datetime parsed from RFC3339 text.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::InvalidDateTime`].
    pub fn datetime_rfc3339(text: &str) -> Result<Value> {
        literal::parse_datetime(text)
            .map(Value::DateTime)
            .map_err(|kind| Error::invalid_literal(kind, Span::default(), text))
    }

    /// A datetime from a chrono instant.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::InvalidDateTime`] when the UTC year falls
    /// outside 0000..=9999.
    pub fn datetime(dt: DateTime<Utc>) -> Result<Value> {
        literal::check_datetime(dt)
            .map(Value::DateTime)
            .map_err(|kind| Error::invalid_literal(kind, Span::default(), &dt.to_rfc3339()))
    }

    #[must_use]
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Value {
        Value::Bytes(bytes.into())
    }

    /// Short lowercase name of the variant, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::DateTime(_) => "datetime",
            Value::Duration(_) => "duration",
            Value::Uuid(_) => "uuid",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Text of a string or of any string-backed typed literal
    /// (decimal, duration, uuid).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sdn::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::Decimal("1.5".to_string()).as_str(), Some("1.5"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Decimal(s) | Value::Duration(s) | Value::Uuid(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, if it is one and fits in an `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => i64::try_from(i).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    /// The float, if this is one. Integers are not coerced.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Node>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&SdnMap> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut SdnMap> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Looks up an object entry by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.as_object_mut().and_then(|obj| obj.get_mut(key))
    }

    /// Looks up an array element by position.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Node> {
        self.as_array().and_then(|arr| arr.get(index))
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.as_object().map_or(false, |obj| obj.contains_key(key))
    }

    /// Sets an object entry. An existing key keeps its position; a new key
    /// is appended.
    ///
    /// # Errors
    ///
    /// Fails when this value is not an object.
    pub fn set(&mut self, key: impl Into<String>, node: Node) -> Result<Option<Node>> {
        match self {
            Value::Object(obj) => Ok(obj.insert(key.into(), node)),
            other => Err(Error::custom(format!(
                "cannot set a key on {}",
                other.type_name()
            ))),
        }
    }

    /// Appends an array element.
    ///
    /// # Errors
    ///
    /// Fails when this value is not an array.
    pub fn push(&mut self, node: Node) -> Result<()> {
        match self {
            Value::Array(arr) => {
                arr.push(node);
                Ok(())
            }
            other => Err(Error::custom(format!(
                "cannot append to {}",
                other.type_name()
            ))),
        }
    }

    /// Object keys in order; empty for anything that is not an object.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.as_object()
            .into_iter()
            .flat_map(|obj| obj.keys().map(String::as_str))
    }

    /// Object entries in order; empty for anything that is not an object.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> + '_ {
        self.as_object()
            .into_iter()
            .flat_map(|obj| obj.iter().map(|(k, n)| (k.as_str(), n)))
    }
}

impl fmt::Display for Value {
    /// Compact SDN text for this value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::ser::value_to_string(self, &crate::Format::compact()))
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => {
                if let Ok(v) = i64::try_from(i) {
                    serializer.serialize_i64(v)
                } else if let Ok(v) = u64::try_from(i) {
                    serializer.serialize_u64(v)
                } else if let Ok(v) = i128::try_from(i) {
                    serializer.serialize_i128(v)
                } else {
                    serializer.serialize_str(&i.to_string())
                }
            }
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Decimal(s) | Value::String(s) | Value::Duration(s) | Value::Uuid(s) => {
                serializer.serialize_str(s)
            }
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::DateTime(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for node in arr {
                    seq.serialize_element(&node.value)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, node) in obj {
                    map.serialize_entry(k, &node.value)?;
                }
                map.end()
            }
        }
    }
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match &value {
            Value::Int(i) => {
                i64::try_from(i).map_err(|_| Error::custom(format!("integer {} out of i64 range", i)))
            }
            _ => Err(Error::custom(format!(
                "expected int, found {}",
                value.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Float(f) => Ok(f),
            other => Err(Error::custom(format!(
                "expected float, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(Error::custom(format!(
                "expected bool, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::custom(format!(
                "expected string, found {}",
                other.type_name()
            ))),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Int(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Int(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl TryFrom<DateTime<Utc>> for Value {
    type Error = Error;

    fn try_from(value: DateTime<Utc>) -> Result<Self> {
        Value::datetime(value)
    }
}

impl From<Vec<Node>> for Value {
    fn from(value: Vec<Node>) -> Self {
        Value::Array(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value.into_iter().map(Node::new).collect())
    }
}

impl From<SdnMap> for Value {
    fn from(value: SdnMap) -> Self {
        Value::Object(value)
    }
}
