//! The parse result: a prolog of directives followed by top-level values.

use crate::{Node, Value};
use serde::{Serialize, Serializer};

/// A `$name: value` prolog entry. The name is stored without its `$`.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub name: String,
    pub value: Node,
}

impl Directive {
    pub fn new(name: impl Into<String>, value: impl Into<Node>) -> Self {
        Directive {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A whole SDN document.
///
/// Text that is a bare `key: value` list parses to a document with one
/// object value, exactly as if the list had been wrapped in braces; a
/// stream of values parses to one entry per value.
///
/// # Examples
///
/// ```rust
/// use serde_sdn::parse;
///
/// let doc = parse("$schema: \"https://example.com/s\"\nname: \"demo\"\nport: 8080").unwrap();
/// assert_eq!(doc.directive("schema").and_then(|n| n.as_str()), Some("https://example.com/s"));
/// let root = doc.root().unwrap();
/// assert_eq!(root.keys().collect::<Vec<_>>(), ["name", "port"]);
///
/// let stream = parse("1, 2, 3").unwrap();
/// assert_eq!(stream.values.len(), 3);
/// assert!(stream.root().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Document {
    pub directives: Vec<Directive>,
    pub values: Vec<Node>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Document::default()
    }

    /// A document holding a single value and no directives.
    #[must_use]
    pub fn from_value(value: impl Into<Node>) -> Self {
        Document {
            directives: Vec::new(),
            values: vec![value.into()],
        }
    }

    /// The value of the first directive with this name.
    #[must_use]
    pub fn directive(&self, name: &str) -> Option<&Node> {
        self.directives
            .iter()
            .find(|d| d.name == name)
            .map(|d| &d.value)
    }

    pub fn push_directive(&mut self, name: impl Into<String>, value: impl Into<Node>) {
        self.directives.push(Directive::new(name, value));
    }

    pub fn push(&mut self, value: impl Into<Node>) {
        self.values.push(value.into());
    }

    /// The single top-level node, if there is exactly one.
    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        match self.values.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn root_mut(&mut self) -> Option<&mut Node> {
        match self.values.as_mut_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Collapses the top level into one value: nothing becomes `Null`, a
    /// single node becomes its value, several become an array of them.
    #[must_use]
    pub fn into_root_value(mut self) -> Value {
        match self.values.len() {
            0 => Value::Null,
            1 => self.values.remove(0).into_value(),
            _ => Value::Array(self.values),
        }
    }
}

/// Serializes the same shape [`Document::into_root_value`] produces.
/// Directives are not included.
impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.values.as_slice() {
            [] => serializer.serialize_unit(),
            [only] => only.serialize(serializer),
            many => many.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_root_value() {
        assert_eq!(Document::new().into_root_value(), Value::Null);
        assert_eq!(Document::from_value(5).into_root_value(), Value::from(5));

        let mut doc = Document::new();
        doc.push(1);
        doc.push("two");
        let root = doc.into_root_value();
        assert_eq!(root.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_directive_lookup() {
        let mut doc = Document::new();
        doc.push_directive("version", 2);
        doc.push_directive("version", 3);
        assert_eq!(doc.directive("version").and_then(|n| n.as_i64()), Some(2));
        assert!(doc.directive("schema").is_none());
    }

    #[test]
    fn test_serialize_matches_root_shape() {
        let mut doc = Document::new();
        assert_eq!(serde_json::to_string(&doc).unwrap(), "null");
        doc.push(1);
        assert_eq!(serde_json::to_string(&doc).unwrap(), "1");
        doc.push(2);
        assert_eq!(serde_json::to_string(&doc).unwrap(), "[1,2]");
    }
}
