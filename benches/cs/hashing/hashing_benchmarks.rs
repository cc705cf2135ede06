use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use unihash::cs::hashing::universal::{hash as universal_hash, simple_hash};
use unihash::cs::hashing::{
    PolyHashBuilder, UniversalHashBuilder, UniversalStringHash, MERSENNE_61,
};

fn random_keys(n: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n).map(|_| rng.gen()).collect()
}

fn random_string(len: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

fn bench_polynomial(c: &mut Criterion) {
    let mut group = c.benchmark_group("polynomial");
    let hasher = PolyHashBuilder::new(MERSENNE_61).seed(1).build().unwrap();
    for len in [8, 64, 1024] {
        let key = random_string(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &key, |b, key| {
            b.iter(|| hasher.hash(black_box(key)))
        });
    }
    group.finish();
}

fn bench_universal(c: &mut Criterion) {
    let mut group = c.benchmark_group("universal");
    let keys = random_keys(1024);
    let hasher = UniversalHashBuilder::new(61, 1 << 50).seed(1).build().unwrap();
    let (a, bb, p, m) = (hasher.a(), hasher.b(), hasher.p(), hasher.m());

    group.bench_function("mersenne_fold", |b| {
        b.iter(|| {
            keys.iter().fold(0u64, |acc, &k| acc ^ hasher.hash(black_box(k)))
        })
    });
    group.bench_function("mersenne_fold_checked", |b| {
        b.iter(|| {
            keys.iter().fold(0u64, |acc, &k| {
                acc ^ universal_hash(black_box(k), a, bb, 61, m).unwrap()
            })
        })
    });
    group.bench_function("division", |b| {
        b.iter(|| {
            keys.iter()
                .fold(0u64, |acc, &k| acc ^ simple_hash(black_box(k), a, bb, p, m).unwrap())
        })
    });
    group.finish();
}

fn bench_string_universal(c: &mut Criterion) {
    let hasher = UniversalStringHash::new(61, 1 << 32).unwrap();
    let key = random_string(64);
    c.bench_function("universal_string_64", |b| {
        b.iter(|| hasher.hash(black_box(&key)))
    });
}

criterion_group!(
    benches,
    bench_polynomial,
    bench_universal,
    bench_string_universal
);
criterion_main!(benches);
