use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use arcpack::compressors::arc_lz::{codecs::lz_stream_codec::ArcLzEncoder, compress};

fn criterion_benchmark(c: &mut Criterion) {
    let data_part = include_bytes!("../src/compressors/arc_lz/codecs/lz_stream_codec.rs");

    let mut text = Vec::new();
    for _ in 0..20 {
        text.extend_from_slice(data_part);
    }

    let zeros = vec![0u8; text.len()];

    let mut c = c.benchmark_group("compress");
    c.measurement_time(Duration::from_secs(20));
    c.throughput(Throughput::Bytes(text.len() as u64));

    for (name, data) in [("source_text", &text), ("zeros", &zeros)] {
        c.bench_with_input(BenchmarkId::new("whole", name), data, |b, data| {
            b.iter(|| compress(data).unwrap())
        });
    }

    c.bench_function("streamed_4k_chunks", |b| {
        b.iter(|| {
            let mut encoder = ArcLzEncoder::new(Vec::new());
            for chunk in text.chunks(4096) {
                encoder.feed(chunk).unwrap();
            }
            encoder.finish().unwrap()
        })
    });

    c.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
