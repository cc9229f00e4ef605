//! SDN serialization.
//!
//! Two serializers live here:
//!
//! - [`Serializer`] writes a [`Document`] (or a lone [`Value`]) as SDN text,
//!   laid out according to a [`Format`].
//! - [`ValueSerializer`] is a `serde` serializer that turns any
//!   `T: Serialize` into a [`Value`] tree. The crate-level
//!   [`to_string`](crate::to_string) goes through it.
//!
//! ## Layout
//!
//! A document with exactly one undecorated, non-empty object and no other
//! values is written in implicit form, as bare `key: value` lines with no
//! braces. Anything else is written as a value stream.
//!
//! ```rust
//! use serde_sdn::{parse, serialize, Format};
//!
//! let doc = parse("name: \"demo\", tags: [#a 1, @b(2) 3]").unwrap();
//! assert_eq!(
//!     serialize(&doc, &Format::pretty()),
//!     "name: \"demo\",\ntags: [\n  #a 1,\n  @b(2) 3,\n],\n"
//! );
//! assert_eq!(
//!     serialize(&doc, &Format::compact()),
//!     "name:\"demo\",tags:[#a 1,@b(2) 3]"
//! );
//! ```

use crate::{literal, Document, Error, Format, Node, Result, SdnMap, Value};
use num_bigint::BigInt;
use serde::{ser, Serialize};

/// The SDN text writer.
pub struct Serializer<'f> {
    output: String,
    format: &'f Format,
}

impl<'f> Serializer<'f> {
    pub fn new(format: &'f Format) -> Self {
        Serializer {
            output: String::with_capacity(256),
            format,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes a whole document: the directive prolog, then the top level.
    pub fn write_document(&mut self, doc: &Document) {
        for directive in &doc.directives {
            self.output.push('$');
            self.write_name(&directive.name);
            self.write_separator();
            self.write_node(&directive.value, 0);
            self.output.push(',');
            if self.format.pretty {
                self.output.push('\n');
            }
        }

        match implicit_object(doc) {
            Some(entries) => self.write_top_level(entries.iter(), |ser, (key, node)| {
                ser.write_entry(key, node, 0);
            }),
            None => self.write_top_level(doc.values.iter(), |ser, node| ser.write_node(node, 0)),
        }
    }

    /// Top-level elements carry no brackets: one per line when pretty,
    /// comma-joined when compact.
    fn write_top_level<I, F>(&mut self, items: I, mut write_item: F)
    where
        I: Iterator,
        F: FnMut(&mut Self, I::Item),
    {
        for (i, item) in items.enumerate() {
            if self.format.pretty {
                write_item(self, item);
                if self.format.trailing_commas {
                    self.output.push(',');
                }
                self.output.push('\n');
            } else {
                if i > 0 {
                    self.output.push(',');
                }
                write_item(self, item);
            }
        }
    }

    pub fn write_node(&mut self, node: &Node, depth: usize) {
        for tag in &node.tags {
            self.output.push('#');
            self.write_name(&tag.name);
            self.output.push(' ');
        }
        for annotation in &node.annotations {
            self.output.push('@');
            self.write_name(&annotation.name);
            if !annotation.args.is_empty() {
                self.output.push('(');
                for (i, arg) in annotation.args.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(if self.format.pretty { ", " } else { "," });
                    }
                    self.write_value(arg, depth);
                }
                self.output.push(')');
            }
            self.output.push(' ');
        }
        self.write_value(&node.value, depth);
    }

    pub fn write_value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.output.push_str("null"),
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Int(i) => self.output.push_str(&i.to_string()),
            Value::Float(f) => self.write_float(*f),
            Value::String(s) => self.write_string(s),
            Value::Decimal(s) => self.write_typed('d', s),
            Value::Duration(s) => self.write_typed('r', s),
            Value::Uuid(s) => self.write_typed('u', s),
            Value::Bytes(bytes) => {
                let encoded = literal::encode_bytes(bytes);
                self.write_typed('b', &encoded);
            }
            Value::DateTime(dt) => {
                let text = dt.to_rfc3339();
                self.write_typed('t', &text);
            }
            Value::Array(items) => {
                self.write_container('[', ']', items.iter(), depth, |ser, node, depth| {
                    ser.write_node(node, depth);
                });
            }
            Value::Object(entries) => {
                self.write_container('{', '}', entries.iter(), depth, |ser, (key, node), depth| {
                    ser.write_entry(key, node, depth);
                });
            }
        }
    }

    fn write_container<I, F>(&mut self, open: char, close: char, items: I, depth: usize, mut write_item: F)
    where
        I: ExactSizeIterator,
        F: FnMut(&mut Self, I::Item, usize),
    {
        self.output.push(open);
        if items.len() == 0 {
            self.output.push(close);
            return;
        }
        for (i, item) in items.enumerate() {
            if self.format.pretty {
                self.output.push('\n');
                self.write_indent(depth + 1);
                write_item(self, item, depth + 1);
                if self.format.trailing_commas {
                    self.output.push(',');
                }
            } else {
                if i > 0 {
                    self.output.push(',');
                }
                write_item(self, item, depth + 1);
            }
        }
        if self.format.pretty {
            self.output.push('\n');
            self.write_indent(depth);
        }
        self.output.push(close);
    }

    fn write_entry(&mut self, key: &str, node: &Node, depth: usize) {
        self.write_name(key);
        self.write_separator();
        self.write_node(node, depth);
    }

    fn write_separator(&mut self) {
        self.output.push_str(if self.format.pretty { ": " } else { ":" });
    }

    fn write_indent(&mut self, depth: usize) {
        for _ in 0..depth * self.format.indent {
            self.output.push(' ');
        }
    }

    /// Keys, tag names, annotation names and directive names: bare when
    /// identifier-shaped, quoted otherwise.
    fn write_name(&mut self, name: &str) {
        if is_bare_name(name) {
            self.output.push_str(name);
        } else {
            self.write_string(name);
        }
    }

    fn write_float(&mut self, f: f64) {
        if !f.is_finite() {
            self.output.push_str("null");
            return;
        }
        let start = self.output.len();
        self.output.push_str(&format!("{:?}", f));
        if !self.output[start..].contains(&['.', 'e', 'E'][..]) {
            self.output.push_str(".0");
        }
    }

    fn write_typed(&mut self, prefix: char, body: &str) {
        self.output.push(prefix);
        self.write_string(body);
    }

    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{0008}' => self.output.push_str("\\b"),
                '\u{000C}' => self.output.push_str("\\f"),
                c if (c as u32) < 0x20 => {
                    self.output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }
}

fn is_bare_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    }
}

/// The entries to write in implicit form, if the document qualifies.
fn implicit_object(doc: &Document) -> Option<&SdnMap> {
    match doc.values.as_slice() {
        [only] if !only.is_decorated() => match &only.value {
            Value::Object(entries) if !entries.is_empty() => Some(entries),
            _ => None,
        },
        _ => None,
    }
}

/// Serializes a document as SDN text.
///
/// # Examples
///
/// ```rust
/// use serde_sdn::{serialize, Document, Format, Node, Value};
///
/// let mut doc = Document::new();
/// doc.push_directive("version", 2);
/// doc.push(Node::from(1).with_tag("first"));
/// doc.push(Value::Null);
/// assert_eq!(serialize(&doc, &Format::compact()), "$version:2,#first 1,null");
/// ```
#[must_use]
pub fn serialize(doc: &Document, format: &Format) -> String {
    tracing::debug!(
        directives = doc.directives.len(),
        values = doc.values.len(),
        pretty = format.pretty,
        "serializing document"
    );
    let mut ser = Serializer::new(format);
    ser.write_document(doc);
    let out = ser.into_inner();
    tracing::debug!(len = out.len(), "serialized document");
    out
}

pub(crate) fn value_to_string(value: &Value, format: &Format) -> String {
    let mut ser = Serializer::new(format);
    ser.write_value(value, 0);
    ser.into_inner()
}

/// A `serde` serializer producing [`Value`] trees.
///
/// Enum variants with data become single-key objects keyed by the variant
/// name; unit variants become strings. Byte buffers become
/// [`Value::Bytes`], and integers outside the `i64` range stay exact as
/// [`Value::Int`].
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Node>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: SdnMap,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::Int(BigInt::from(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::Int(BigInt::from(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(single_entry(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(Some(variant)))
    }
}

fn single_entry(key: &str, value: Value) -> Value {
    let mut map = SdnMap::with_capacity(1);
    map.insert(key.to_string(), Node::new(value));
    Value::Object(map)
}

fn wrap_variant(variant: Option<&'static str>, value: Value) -> Value {
    match variant {
        Some(name) => single_entry(name, value),
        None => value,
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(Node::new(to_value(value)?));
        Ok(())
    }

    fn finish(self) -> Value {
        wrap_variant(self.variant, Value::Array(self.vec))
    }
}

impl SerializeMap {
    fn new(variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: SdnMap::new(),
            current_key: None,
            variant,
        }
    }

    fn field<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), Node::new(to_value(value)?));
        Ok(())
    }

    fn finish(self) -> Value {
        wrap_variant(self.variant, Value::Object(self.map))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match to_value(key)? {
            Value::String(s) => s,
            Value::Int(i) => i.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(Error::custom(format!(
                    "map keys must be strings, found {}",
                    other.type_name()
                )))
            }
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.field(&key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Errors
///
/// Fails on map keys that are not strings, integers or booleans, or when
/// `T`'s own `Serialize` impl reports an error.
///
/// # Examples
///
/// ```rust
/// use serde_sdn::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// enum Shape { Circle { r: u32 }, Empty }
///
/// let v = to_value(&vec![Shape::Circle { r: 2 }, Shape::Empty]).unwrap();
/// assert_eq!(v.to_string(), "[{Circle:{r:2}},\"Empty\"]");
/// ```
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}
