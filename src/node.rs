//! Decorated nodes.
//!
//! A [`Node`] wraps exactly one [`Value`] together with the [`Tag`]s and
//! [`Annotation`]s written in front of it. Decorations are metadata about
//! their node's value and are kept in source order.
//!
//! ```rust
//! use serde_sdn::{parse, Value};
//!
//! let doc = parse("#x #y @f(1) @g \"v\"").unwrap();
//! let node = &doc.values[0];
//! assert_eq!(node.tag_names().collect::<Vec<_>>(), ["x", "y"]);
//! assert_eq!(node.annotations[0].args, vec![Value::from(1)]);
//! assert!(node.annotations[1].args.is_empty());
//! assert_eq!(node.as_str(), Some("v"));
//! ```

use crate::{SdnMap, Value};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use std::ops::{Deref, DerefMut};

/// A bare `#name` marker.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }
}

/// An `@name` or `@name(arg, …)` marker. Arguments are plain values and
/// cannot be decorated themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub name: String,
    pub args: Vec<Value>,
}

impl Annotation {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Annotation {
            name: name.into(),
            args,
        }
    }
}

/// A value plus its decorations.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Node {
    pub tags: Vec<Tag>,
    pub annotations: Vec<Annotation>,
    pub value: Value,
}

impl Node {
    /// An undecorated node.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Node {
            tags: Vec::new(),
            annotations: Vec::new(),
            value,
        }
    }

    /// Appends a tag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sdn::{Node, Value};
    ///
    /// let node = Node::from(1)
    ///     .with_tag("important")
    ///     .with_annotation("range", vec![Value::from(0), Value::from(10)]);
    /// assert!(node.has_tag("important"));
    /// assert_eq!(node.annotation("range").map(|a| a.args.len()), Some(2));
    /// ```
    #[must_use]
    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        self.tags.push(Tag::new(name));
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, name: impl Into<String>, args: Vec<Value>) -> Self {
        self.annotations.push(Annotation::new(name, args));
        self
    }

    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    pub fn tag_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tags.iter().map(|t| t.name.as_str())
    }

    /// The first annotation with this name.
    #[must_use]
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub fn is_decorated(&self) -> bool {
        !self.tags.is_empty() || !self.annotations.is_empty()
    }

    /// Drops the decorations.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl Deref for Node {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.value
    }
}

impl DerefMut for Node {
    fn deref_mut(&mut self) -> &mut Value {
        &mut self.value
    }
}

/// Serializes the plain value; decorations are not part of native data.
impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::new(value)
    }
}

macro_rules! impl_node_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Node {
                fn from(value: $t) -> Self {
                    Node::new(Value::from(value))
                }
            }
        )*
    };
}

impl_node_from!(
    bool,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    BigInt,
    String,
    &str,
    Vec<Node>,
    Vec<Value>,
    SdnMap
);
