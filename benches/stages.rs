use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use burrows::bwt_algorithms::bwt_sort::{bwt_decode, bwt_encode};
use burrows::bwt_algorithms::suffix_rank::SuffixRank;
use burrows::tools::cli::Algorithms;
use burrows::tools::mtf::{mtf_decode, mtf_encode};

fn text_block(len: usize) -> Vec<u8> {
    let words = b"block sorting groups similar contexts so that move to front sees runs ";
    words.iter().cycle().take(len).copied().collect()
}

fn noise_block(len: usize) -> Vec<u8> {
    (0..len as u32)
        .map(|i| (i.wrapping_mul(2_654_435_761) >> 11) as u8)
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    for (name, data) in [("text", text_block(64 * 1024)), ("noise", noise_block(64 * 1024))] {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_function(format!("simple/{}", name), |b| {
            b.iter(|| SuffixRank::new(black_box(&data), &Algorithms::Simple))
        });
        group.bench_function(format!("doubling/{}", name), |b| {
            b.iter(|| SuffixRank::new(black_box(&data), &Algorithms::Doubling))
        });
    }
    group.finish();
}

fn bench_bwt(c: &mut Criterion) {
    let data = text_block(256 * 1024);
    let (key, bwt) = bwt_encode(&data, &Algorithms::Auto).expect("bwt");
    let mut group = c.benchmark_group("bwt");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("encode", |b| {
        b.iter(|| bwt_encode(black_box(&data), &Algorithms::Auto))
    });
    group.bench_function("decode", |b| b.iter(|| bwt_decode(key, black_box(&bwt))));
    group.finish();
}

fn bench_mtf(c: &mut Criterion) {
    let data = noise_block(256 * 1024);
    let codes = mtf_encode(&data);
    let mut group = c.benchmark_group("mtf");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("encode", |b| b.iter(|| mtf_encode(black_box(&data))));
    group.bench_function("decode", |b| b.iter(|| mtf_decode(black_box(&codes))));
    group.finish();
}

criterion_group!(benches, bench_rank, bench_bwt, bench_mtf);
criterion_main!(benches);
