//! Benchmarks for library resolution and native call overhead

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nativecall::exports::MyLib;
use nativecall::ffi::{resolve_library_path, FfiSignature, LibraryLoader};

/// Benchmark pure path resolution
fn bench_resolve(c: &mut Criterion) {
    c.bench_function("resolve_library_path", |b| {
        b.iter(|| resolve_library_path(black_box("linux"), black_box("build"), black_box("mylib")))
    });

    c.bench_function("parse_signature", |b| {
        b.iter(|| FfiSignature::parse(black_box("void test_array(void* data, size_t len)")))
    });
}

/// Benchmark calls into the fixture library, when it was built
fn bench_calls(c: &mut Criterion) {
    let Ok(loader) = LibraryLoader::new(env!("NATIVECALL_FIXTURE_DIR"), "mylib") else {
        return;
    };
    let Ok(library) = loader.load() else {
        eprintln!("fixture library not built, skipping call benchmarks");
        return;
    };
    let Ok(lib) = MyLib::bind(&library) else {
        return;
    };

    c.bench_function("twice_int", |b| b.iter(|| lib.twice_int(black_box(21))));
    c.bench_function("twice_float", |b| b.iter(|| lib.twice_float(black_box(1.5))));
}

criterion_group!(benches, bench_resolve, bench_calls);
criterion_main!(benches);
