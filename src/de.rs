//! Deserialization from [`Value`] trees into Rust types.
//!
//! Text goes through [`parse`](crate::parse) first; the resulting document
//! collapses to one value (see [`Document::into_root_value`]) which is then
//! handed to [`ValueDeserializer`].
//!
//! Decorations never reach the target type. Typed strings arrive as plain
//! strings (`d"1.5"` as `"1.5"`, `t"…"` as its RFC3339 text), bytes as a byte
//! buffer, and integers through the narrowest `visit_*` that holds them.
//!
//! ```rust
//! use serde_sdn::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config { name: String, port: u16, tags: Vec<String> }
//!
//! let text = "name: \"api\"\nport: #default 8080\ntags: [\"a\", \"b\",]";
//! let config: Config = from_str(text).unwrap();
//! assert_eq!(config.port, 8080);
//! ```
//!
//! [`Document::into_root_value`]: crate::Document::into_root_value

use crate::{Error, Node, Result, SdnMap, Value};
use num_bigint::BigInt;
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{de, forward_to_deserialize_any};

/// A `serde` deserializer that consumes a [`Value`].
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    #[must_use]
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

fn visit_int<'de, V>(i: BigInt, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    if let Ok(v) = i64::try_from(&i) {
        visitor.visit_i64(v)
    } else if let Ok(v) = u64::try_from(&i) {
        visitor.visit_u64(v)
    } else if let Ok(v) = i128::try_from(&i) {
        visitor.visit_i128(v)
    } else if let Ok(v) = u128::try_from(&i) {
        visitor.visit_u128(v)
    } else {
        visitor.visit_string(i.to_string())
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(i) => visit_int(i, visitor),
            Value::Float(f) => visitor.visit_f64(f),
            Value::String(s) | Value::Decimal(s) | Value::Duration(s) | Value::Uuid(s) => {
                visitor.visit_string(s)
            }
            Value::Bytes(bytes) => visitor.visit_byte_buf(bytes),
            Value::DateTime(dt) => visitor.visit_string(dt.to_rfc3339()),
            Value::Array(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            Value::Object(entries) => visitor.visit_map(MapDeserializer::new(entries)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(entries) => {
                let mut iter = entries.into_iter();
                match (iter.next(), iter.next()) {
                    (Some((variant, node)), None) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, node.into_value()))
                    }
                    _ => Err(Error::custom(
                        "expected an object with exactly one key for an enum variant",
                    )),
                }
            }
            other => Err(Error::custom(format!(
                "expected a string or object for an enum, found {}",
                other.type_name()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Node>,
}

impl SeqDeserializer {
    fn new(items: Vec<Node>) -> Self {
        SeqDeserializer {
            iter: items.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(node) => seed
                .deserialize(ValueDeserializer::new(node.into_value()))
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Node>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(entries: SdnMap) -> Self {
        MapDeserializer {
            iter: entries.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, node)) => {
                self.value = Some(node.into_value());
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(IntoDeserializer::<Error>::into_deserializer(self.variant))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            other => Err(Error::custom(format!(
                "expected null for a unit variant, found {}",
                other.type_name()
            ))),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Array(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            other => Err(Error::custom(format!(
                "expected an array for a tuple variant, found {}",
                other.type_name()
            ))),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Object(entries) => visitor.visit_map(MapDeserializer::new(entries)),
            other => Err(Error::custom(format!(
                "expected an object for a struct variant, found {}",
                other.type_name()
            ))),
        }
    }
}

/// Deserializes a `T` out of a [`Value`].
///
/// # Errors
///
/// Fails when the value's shape does not match what `T` expects.
///
/// # Examples
///
/// ```rust
/// use serde_sdn::{from_value, sdn};
///
/// let pair: (i32, String) = from_value(sdn!([1, "one"])).unwrap();
/// assert_eq!(pair, (1, "one".to_string()));
/// ```
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}
