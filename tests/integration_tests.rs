use serde::{Deserialize, Serialize};
use serde_sdn::{
    from_reader, from_slice, from_str, from_value, parse, to_string, to_string_with_format,
    to_value, to_writer_with_format, Format, Value,
};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
    note: Option<String>,
}

fn alice() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    }
}

fn order() -> Order {
    Order {
        order_id: 12345,
        customer: alice(),
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
        note: None,
    }
}

fn assert_roundtrip<T>(original: &T)
where
    T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug,
{
    for format in [Format::pretty(), Format::compact(), Format::pretty().with_trailing_commas(false)] {
        let text = to_string_with_format(original, &format).unwrap();
        let deserialized: T = from_str(&text).unwrap();
        assert_eq!(*original, deserialized, "via {:?}", text);
    }
}

#[test]
fn test_simple_struct() {
    let text = to_string(&alice()).unwrap();
    assert_eq!(
        text,
        "id: 123,\nname: \"Alice\",\nactive: true,\ntags: [\n  \"admin\",\n  \"developer\",\n],\n"
    );
    let user_back: User = from_str(&text).unwrap();
    assert_eq!(user_back, alice());
}

#[test]
fn test_nested_struct() {
    assert_roundtrip(&order());

    let text = to_string_with_format(&order(), &Format::compact()).unwrap();
    assert!(text.starts_with("order_id:12345,customer:{id:123,"));
    assert!(text.ends_with("total:109.97,note:null"));
}

#[test]
fn test_array_of_objects() {
    let products = order().items;
    assert_roundtrip(&products);
}

#[test]
fn test_hand_written_input() {
    let text = r#"
        // an order, written by hand
        order_id: 7
        customer: {
            id: 1, name: "Bob", active: false,
            tags: [],   /* none yet */
        }
        items: [
            {sku: "X", price: 1.5, quantity: 3},
            #discounted {sku: "Y", price: 2.0, quantity: 1,},
        ]
        total: @currency("EUR") 6.5
    "#;
    let order: Order = from_str(text).unwrap();
    assert_eq!(order.order_id, 7);
    assert_eq!(order.customer.name, "Bob");
    assert_eq!(order.items[1].sku, "Y");
    assert_eq!(order.total, 6.5);
    assert_eq!(order.note, None);
}

#[test]
fn test_primitives() {
    assert_roundtrip(&42i32);
    assert_roundtrip(&3.5f64);
    assert_roundtrip(&true);
    assert_roundtrip(&false);
    assert_roundtrip(&"hello world".to_string());
    assert_roundtrip(&vec![1, 2, 3, 4, 5]);
    assert_roundtrip(&'x');
    assert_roundtrip(&());
}

#[test]
fn test_numbers() {
    assert_roundtrip(&-128i8);
    assert_roundtrip(&32767i16);
    assert_roundtrip(&-2147483648i32);
    assert_roundtrip(&i64::MIN);
    assert_roundtrip(&i64::MAX);
    assert_roundtrip(&u64::MAX);
    assert_roundtrip(&i128::MIN);
    assert_roundtrip(&u128::MAX);

    assert_roundtrip(&0.0f32);
    assert_roundtrip(&-2.5f32);
    assert_roundtrip(&1e-300f64);
    assert_roundtrip(&1.7976931348623157e308f64);
    assert_roundtrip(&0.1f64);
}

#[test]
fn test_integer_as_float_field() {
    #[derive(Deserialize)]
    struct Measure {
        value: f64,
    }

    let m: Measure = from_str("value: 3").unwrap();
    assert_eq!(m.value, 3.0);
}

#[test]
fn test_special_strings() {
    let special_strings = [
        "",
        "hello, world",
        "line1\nline2",
        "tab\there",
        "key: value",
        "// not a comment",
        "#tag @ann $dir",
        "true",
        "null",
        "123",
        "\"quoted\"",
        "back\\slash",
        "\"\"\"",
        "unicode: 日本語 🎉",
        "\u{0}\u{1f}",
    ];

    for s in special_strings {
        assert_roundtrip(&s.to_string());
    }
}

#[test]
fn test_empty_collections() {
    let empty_vec: Vec<i32> = vec![];
    assert_roundtrip(&empty_vec);

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Empty {}

    assert_roundtrip(&Empty {});
    assert_roundtrip(&BTreeMap::<String, i32>::new());
}

#[test]
fn test_maps_and_enums() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Event {
        Start,
        Move { x: i32, y: i32 },
        Say(String),
        Pair(u8, u8),
    }

    let mut map = BTreeMap::new();
    map.insert("first key".to_string(), vec![Event::Start, Event::Say("hi".into())]);
    map.insert("second".to_string(), vec![Event::Move { x: 1, y: -1 }, Event::Pair(1, 2)]);
    assert_roundtrip(&map);

    let text = to_string_with_format(&Event::Move { x: 1, y: 2 }, &Format::compact()).unwrap();
    assert_eq!(text, "Move:{x:1,y:2}");
}

#[test]
fn test_to_value() {
    let value = to_value(&alice()).unwrap();
    assert!(value.is_object());
    assert_eq!(value.get("id").and_then(|n| n.as_i64()), Some(123));
    assert_eq!(value.get("name").and_then(|n| n.as_str()), Some("Alice"));
    assert_eq!(value.get("active").and_then(|n| n.as_bool()), Some(true));
    let tags = value.get("tags").and_then(|n| n.as_array()).unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].value, Value::String("admin".to_string()));

    let back: User = from_value(value).unwrap();
    assert_eq!(back, alice());
}

#[test]
fn test_unwrap_to_native_json() {
    let doc = parse(
        r#"
        id: u"550e8400-e29b-41d4-a716-446655440000"
        price: #money d"10.50"
        blob: b"AQID"
        when: t"2024-01-15T10:30:00Z"
        big: 1234567890123456789012345678901234567890123
        ttl: r"P1D"
        nested: [@a 1, {k: null}]
        "#,
    )
    .unwrap();
    let json: serde_json::Value = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "price": "10.50",
            "blob": [1, 2, 3],
            "when": "2024-01-15T10:30:00+00:00",
            "big": "1234567890123456789012345678901234567890123",
            "ttl": "P1D",
            "nested": [1, {"k": null}]
        })
    );
}

#[test]
fn test_reader_writer() {
    let mut buffer = Vec::new();
    to_writer_with_format(&mut buffer, &order(), &Format::compact()).unwrap();
    let back: Order = from_reader(buffer.as_slice()).unwrap();
    assert_eq!(back, order());
    let back: Order = from_slice(&buffer).unwrap();
    assert_eq!(back, order());
}

#[test]
fn test_shape_mismatch_errors() {
    assert!(from_str::<User>("id: \"not a number\"").is_err());
    assert!(from_str::<Vec<i32>>("a: 1").is_err());
    assert!(from_str::<u8>("256").is_err());
}
