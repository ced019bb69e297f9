use picokeyer_codec::{ConfigRecord, decode, encode};
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_codec(c: &mut Criterion) {
    let record = ConfigRecord::default();
    let payload = encode(&record).unwrap();

    c.bench_function("encode_config", |b| {
        b.iter(|| {
            let _ = encode(&record).unwrap();
        })
    });

    c.bench_function("decode_config", |b| {
        b.iter(|| {
            let _ = decode(&payload).unwrap();
        })
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
