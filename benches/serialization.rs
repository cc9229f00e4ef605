use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_sdn::{from_str, parse, serialize, to_string, Format};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

fn decorated_document(size: usize) -> String {
    let mut text = String::from("$schema: \"https://example.com/inventory.json\"\n$version: 2\n");
    text.push_str("items: [\n");
    for i in 0..size {
        text.push_str(&format!(
            "  // item {i}\n  #stock @unit(\"kg\", {i}) {{\n    id: u\"123e4567-e89b-12d3-a456-{i:012}\",\n    price: d\"{i}.50\",\n    added: t\"2024-01-15T10:30:00Z\",\n    shelf_life: r\"P{i}D\",\n    blob: b\"aGVsbG8=\",\n    note: \"\"\"raw\n text\"\"\",\n  }},\n"
        ));
    }
    text.push_str("]\n");
    text
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let text = "id: 123\nname: \"Alice\"\nemail: \"alice@example.com\"\nactive: true";

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(text)))
    });
}

fn benchmark_arrays(c: &mut Criterion) {
    let mut group = c.benchmark_group("product_array");

    for size in [10, 100, 500] {
        let items = products(size);
        let text = to_string(&items).unwrap();

        group.bench_with_input(BenchmarkId::new("serialize", size), &items, |b, items| {
            b.iter(|| to_string(black_box(items)))
        });
        group.bench_with_input(BenchmarkId::new("deserialize", size), &text, |b, text| {
            b.iter(|| from_str::<Vec<Product>>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("decorated_document");

    for size in [10, 100] {
        let text = decorated_document(size);
        let doc = parse(&text).unwrap();

        group.bench_with_input(BenchmarkId::new("parse", size), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
        group.bench_with_input(BenchmarkId::new("serialize_pretty", size), &doc, |b, doc| {
            b.iter(|| serialize(black_box(doc), &Format::pretty()))
        });
        group.bench_with_input(BenchmarkId::new("serialize_compact", size), &doc, |b, doc| {
            b.iter(|| serialize(black_box(doc), &Format::compact()))
        });
    }
    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let items = products(100);
    let mut group = c.benchmark_group("comparison");

    group.bench_function("sdn_serialize", |b| {
        b.iter(|| serde_sdn::to_string(black_box(&items)))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&items)))
    });

    let sdn_str = serde_sdn::to_string(&items).unwrap();
    let json_str = serde_json::to_string(&items).unwrap();

    group.bench_function("sdn_deserialize", |b| {
        b.iter(|| serde_sdn::from_str::<Vec<Product>>(black_box(&sdn_str)))
    });

    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<Vec<Product>>(black_box(&json_str)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_arrays,
    benchmark_document,
    benchmark_comparison_with_json
);
criterion_main!(benches);
