/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Arrays and objects nest; anything else goes through
/// [`to_value`](crate::to_value) and becomes `null` if that fails.
///
/// ```rust
/// use serde_sdn::{sdn, Value};
///
/// let v = sdn!({
///     "name": "demo",
///     "ports": [80, 443],
///     "debug": false
/// });
/// assert_eq!(v.to_string(), "{name:\"demo\",ports:[80,443],debug:false}");
/// ```
#[macro_export]
macro_rules! sdn {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::Node::new($crate::sdn!($elem))),*])
    };

    ({}) => {
        $crate::Value::Object($crate::SdnMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::SdnMap::new();
        $(
            object.insert($key.to_string(), $crate::Node::new($crate::sdn!($value)));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}
