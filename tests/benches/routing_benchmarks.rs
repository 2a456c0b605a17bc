//! # Tier Routing Benchmarks
//!
//! | Subsystem | Operation | Target |
//! |-----------|-----------|--------|
//! | qc-18 Wire Codec | decode 1k-tx block | < 1ms |
//! | qc-19 Tier Routing | resolve | < 100ns |
//! | qc-19 Tier Routing | pipeline handle per block | < 100µs |

use criterion::{criterion_group, criterion_main, Criterion};
use qc_tests::benchmarks::{qc_18_wire_codec, qc_19_tier_routing};

fn wire_codec(c: &mut Criterion) {
    qc_18_wire_codec::register_benchmarks(c);
}

fn tier_routing(c: &mut Criterion) {
    qc_19_tier_routing::register_benchmarks(c);
}

criterion_group!(benches, wire_codec, tier_routing);
criterion_main!(benches);
