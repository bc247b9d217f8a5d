use cookiepack::cookies::attributes::CookieOptions;
use cookiepack::cookies::document::MemoryDocument;
use cookiepack::cookies::packed::PackedCookie;
use cookiepack::cookies::store::CookieStore;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_pack_codec(c: &mut Criterion) {
    let packed: PackedCookie = (0..50)
        .map(|i| (format!("key{}", i), format!("value {} & more", i)))
        .collect();
    let encoded = packed.encode();

    c.bench_function("packed_encode", |b| {
        b.iter(|| black_box(black_box(&packed).encode()))
    });

    c.bench_function("packed_decode", |b| {
        b.iter(|| black_box(PackedCookie::decode(black_box(&encoded))))
    });
}

fn benchmark_store(c: &mut Criterion) {
    let store = CookieStore::new(MemoryDocument::parse("https://example.com/").unwrap());
    let opts = CookieOptions::new().with_base_key("bag");
    for i in 0..30 {
        store.set(&format!("k{}", i), "v", opts.clone());
    }

    c.bench_function("store_set_packed", |b| {
        b.iter(|| store.set(black_box("k15"), black_box("updated"), opts.clone()))
    });

    c.bench_function("store_get_packed", |b| {
        b.iter(|| black_box(store.get(black_box("k29"), Some("bag"))))
    });
}

criterion_group!(benches, benchmark_pack_codec, benchmark_store);
criterion_main!(benches);
