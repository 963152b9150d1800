//! Benchmarks for dictionary coding at each level.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use redarc_lzss::{DictionaryParams, decode_lzss, encode_lzss};
use std::hint::black_box;

/// Text-like data with plenty of short repeats.
fn text_like(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. \
                 Pack my box with five dozen liquor jugs. \
                 How vexingly quick daft zebras jump! ";
    text.iter().copied().cycle().take(size).collect()
}

/// Pseudo-random data with no structure.
fn random(size: usize) -> Vec<u8> {
    let mut seed: u64 = 0x123456789ABCDEF0;
    (0..size)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 32) as u8
        })
        .collect()
}

fn bench_levels(c: &mut Criterion) {
    let size = 256 * 1024;
    let patterns: [(&str, Vec<u8>); 2] = [("text", text_like(size)), ("random", random(size))];

    for (pattern, data) in &patterns {
        let mut group = c.benchmark_group(format!("lzss_{}", pattern));
        group.throughput(Throughput::Bytes(size as u64));

        for level in 2..=6u8 {
            let params = DictionaryParams::from_level(level).unwrap();
            let encoded = encode_lzss(data, params);

            group.bench_with_input(BenchmarkId::new("encode", level), data, |b, data| {
                b.iter(|| encode_lzss(black_box(data), params))
            });
            group.bench_with_input(BenchmarkId::new("decode", level), &encoded, |b, encoded| {
                b.iter(|| decode_lzss(black_box(encoded), params, size))
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_levels);
criterion_main!(benches);
