//! # QC-19 Tier Routing Benchmarks
//!
//! - Registry resolve for hosted and unhosted locations
//! - Full gossip pipeline (decode, admission, dispatch) per payload kind

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, BenchmarkId, Criterion};
use node_runtime::{NodeConfig, NodeContainer};
use qc_18_wire_codec::{marshal, Topic, WireKind, WireObject};
use shared_types::{Location, Transactions};

use crate::fixtures::{self, generate_chain};

fn node() -> Option<Arc<NodeContainer>> {
    NodeContainer::new(NodeConfig::default()).ok().map(Arc::new)
}

pub fn bench_registry_resolve(c: &mut Criterion) {
    let Some(node) = node() else {
        return;
    };
    let mut group = c.benchmark_group("qc-19/registry");

    for location in [Location::prime(), Location::zone(0, 0), Location::zone(3, 3)] {
        group.bench_with_input(
            BenchmarkId::new("resolve", location.to_string()),
            &location,
            |b, loc| b.iter(|| black_box(node.registry.resolve(loc).is_ok())),
        );
    }

    group.finish();
}

pub fn bench_gossip_pipeline(c: &mut Criterion) {
    let Some(node) = node() else {
        return;
    };
    let mut group = c.benchmark_group("qc-19/pipeline");
    group.measurement_time(Duration::from_secs(5));

    let zone = Location::zone(0, 0);
    if let Some(backend) = node.backend(&zone) {
        backend.set_synchronized(true);
    }
    let block = generate_chain(&fixtures::genesis(zone), 1, |_, gen| {
        gen.add_transaction(fixtures::transaction(1));
    })
    .remove(0);
    let batch = Transactions((0..20).map(fixtures::transaction).collect());

    let inputs = [
        (WireKind::BlockView, WireObject::BlockView(block.block_view())),
        (WireKind::Transactions, WireObject::Transactions(batch)),
        (WireKind::WorkShare, WireObject::WorkShare(fixtures::work_share(zone, 1))),
    ];
    let peer = fixtures::peer(1);

    for (kind, object) in inputs {
        let topic = Topic::new(zone, kind).to_string();
        let bytes = marshal(&object);
        group.bench_with_input(BenchmarkId::new("handle", kind), &bytes, |b, data| {
            b.iter(|| black_box(node.pipeline.handle(&peer, &topic, data)))
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_registry_resolve(c);
    bench_gossip_pipeline(c);
}
