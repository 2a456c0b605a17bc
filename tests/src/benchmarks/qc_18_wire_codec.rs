//! # QC-18 Wire Codec Benchmarks
//!
//! - Gossip marshal/unmarshal of block views by transaction count
//! - Response envelope decode for each result shape

use std::time::Duration;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use qc_18_wire_codec::{
    encode_response, marshal, unmarshal, Response, ResponseData, WireCodec, WireKind, WireObject,
};
use shared_types::{Location, WorkObject};

use crate::fixtures::{self, generate_chain};

fn block_with_transactions(count: usize) -> WorkObject {
    let genesis = fixtures::genesis(Location::zone(0, 0));
    let mut chain = generate_chain(&genesis, 1, |_, gen| {
        for n in 0..count {
            gen.add_transaction(fixtures::transaction(n as u64));
        }
    });
    chain.remove(0)
}

pub fn bench_block_marshal(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18/marshal");
    group.measurement_time(Duration::from_secs(5));

    for size in [0usize, 10, 100, 1_000] {
        let object = WireObject::BlockView(block_with_transactions(size).block_view());
        let bytes = marshal(&object);
        let source = Location::zone(0, 0);

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode_block", size), &object, |b, o| {
            b.iter(|| black_box(marshal(o)))
        });
        group.bench_with_input(BenchmarkId::new("decode_block", size), &bytes, |b, data| {
            b.iter(|| black_box(unmarshal(data, WireKind::BlockView, &source).is_ok()))
        });
    }

    group.finish();
}

pub fn bench_response_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18/envelope");
    group.measurement_time(Duration::from_secs(5));

    let block = block_with_transactions(50);
    let responses = [
        ("block_view", ResponseData::BlockView(Some(block.block_view()))),
        ("header_view", ResponseData::HeaderView(Some(block.header_view()))),
        ("hash", ResponseData::Hash(Some(block.hash()))),
    ];
    let codec = WireCodec::new();

    for (name, data) in responses {
        let bytes = encode_response(&Response {
            id: 1,
            location: Location::zone(0, 0),
            data,
        });
        group.bench_with_input(BenchmarkId::new("decode", name), &bytes, |b, data| {
            b.iter(|| black_box(codec.decode(data).is_ok()))
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_block_marshal(c);
    bench_response_decode(c);
}
