//! Property-based tests over generated documents.
//!
//! Trees are built directly (not from text) so every value variant,
//! decoration and awkward key shows up, then pushed through
//! serialize -> parse.

use chrono::{TimeZone, Utc};
use num_bigint::BigInt;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_sdn::{
    from_str, parse, serialize, to_string, Annotation, Directive, Document, Format, Node, Tag,
    Value,
};

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-zA-Z0-9_-]{0,8}",
        ".{0,8}",
        Just("true".to_string()),
        Just("null".to_string()),
    ]
}

fn arb_leaf() -> BoxedStrategy<Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<i128>().prop_map(|i| Value::Int(BigInt::from(i) * BigInt::from(1_000_000_007u64))),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::Float),
        any::<String>().prop_map(Value::String),
        "[+-]?[0-9]{1,6}(\\.[0-9]{1,4})?".prop_map(Value::Decimal),
        prop::collection::vec(any::<u8>(), 0..24).prop_map(Value::Bytes),
        "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}".prop_map(Value::Uuid),
        (0i64..4_000_000_000, 0u32..1_000_000_000).prop_map(|(secs, nanos)| {
            Value::DateTime(Utc.timestamp_opt(secs, nanos).unwrap())
        }),
        "P[0-9]{1,3}DT[0-9]{1,2}H".prop_map(Value::Duration),
    ]
    .boxed()
}

fn arb_node(value: BoxedStrategy<Value>) -> BoxedStrategy<Node> {
    let annotation = (arb_name(), prop::collection::vec(arb_leaf(), 0..3))
        .prop_map(|(name, args)| Annotation::new(name, args));
    (
        prop::collection::vec(arb_name().prop_map(Tag::new), 0..3),
        prop::collection::vec(annotation, 0..3),
        value,
    )
        .prop_map(|(tags, annotations, value)| Node {
            tags,
            annotations,
            value,
        })
        .boxed()
}

fn arb_value() -> BoxedStrategy<Value> {
    arb_leaf()
        .prop_recursive(4, 48, 5, |inner| {
            let node = arb_node(inner);
            prop_oneof![
                prop::collection::vec(node.clone(), 0..5).prop_map(Value::Array),
                prop::collection::vec((arb_name(), node), 0..5)
                    .prop_map(|entries| Value::Object(entries.into_iter().collect())),
            ]
        })
        .boxed()
}

fn arb_document() -> impl Strategy<Value = Document> {
    let directive = (arb_name(), arb_node(arb_value()))
        .prop_map(|(name, value)| Directive { name, value });
    (
        prop::collection::vec(directive, 0..3),
        prop::collection::vec(arb_node(arb_value()), 0..4),
    )
        .prop_map(|(directives, values)| Document { directives, values })
}

fn arb_format() -> impl Strategy<Value = Format> {
    (any::<bool>(), 0usize..5, any::<bool>()).prop_map(|(pretty, indent, trailing_commas)| {
        Format {
            pretty,
            indent,
            trailing_commas,
        }
    })
}

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

proptest! {
    #[test]
    fn prop_document_roundtrip(doc in arb_document(), format in arb_format()) {
        let text = serialize(&doc, &format);
        let parsed = parse(&text);
        prop_assert!(parsed.is_ok(), "failed to parse {:?}: {:?}", text, parsed);
        prop_assert_eq!(parsed.unwrap(), doc);
    }

    #[test]
    fn prop_serialize_is_stable(doc in arb_document()) {
        let format = Format::pretty();
        let once = serialize(&doc, &format);
        let twice = serialize(&parse(&once).unwrap(), &format);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_layout_does_not_change_tree(doc in arb_document()) {
        let pretty = parse(&serialize(&doc, &Format::pretty())).unwrap();
        let bare = parse(&serialize(&doc, &Format::pretty().with_trailing_commas(false))).unwrap();
        let compact = parse(&serialize(&doc, &Format::compact())).unwrap();
        prop_assert_eq!(&pretty, &bare);
        prop_assert_eq!(&pretty, &compact);
    }

    #[test]
    fn prop_big_integers_keep_digits(digits in "-?[1-9][0-9]{0,60}") {
        let doc = parse(&format!("value: {}", digits)).unwrap();
        let value = doc.root().and_then(|root| root.get("value")).unwrap();
        prop_assert_eq!(value.as_bigint().map(ToString::to_string), Some(digits));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u64(n in any::<u64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_f64(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert!(roundtrip(&f));
    }

    #[test]
    fn prop_string(s in any::<String>()) {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_struct(id in any::<u32>(), name in ".*", tags in prop::collection::vec(".*", 0..4)) {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Record {
            id: u32,
            name: String,
            tags: Vec<String>,
        }

        let record = Record { id, name, tags };
        prop_assert!(roundtrip(&record));
    }
}
