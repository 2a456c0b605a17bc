//! # Concurrency Stress Tests
//!
//! Many concurrent broadcasts across disjoint locations must leave shared
//! counters exact and release every pooled payload exactly once.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use node_runtime::{NodeConfig, NodeContainer, NodeRuntime};
    use qc_18_wire_codec::{marshal, Topic, WireKind, WireObject};
    use qc_19_tier_routing::ConsensusBackend;
    use quantum_telemetry::WorkObjectCounter;
    use shared_types::{Location, MAX_REGIONS, MAX_ZONES};

    use crate::fixtures::{self, generate_chain};

    const CALLS_PER_ZONE: usize = 80;

    fn all_zones() -> Vec<Location> {
        (0..MAX_REGIONS as u8)
            .flat_map(|r| (0..MAX_ZONES as u8).map(move |z| Location::zone(r, z)))
            .collect()
    }

    async fn full_node() -> Arc<NodeContainer> {
        let mut config = NodeConfig::default();
        config.routing.hosted_locations = all_zones();
        config.routing.pool_capacity = 64;
        let runtime = NodeRuntime::new(config).unwrap();
        runtime.start().await.unwrap();
        runtime.container()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_block_gossip_across_zones() {
        let node = full_node().await;
        let zones = all_zones();

        let mut handles = Vec::new();
        for (i, zone) in zones.iter().copied().enumerate() {
            let chain = generate_chain(&fixtures::genesis(zone), CALLS_PER_ZONE, |_, _| {});
            for block in chain {
                let node = Arc::clone(&node);
                let topic = Topic::new(zone, WireKind::BlockView).to_string();
                let bytes = marshal(&WireObject::BlockView(block.block_view()));
                let peer = fixtures::peer(i as u8);
                handles.push(tokio::spawn(async move {
                    node.pipeline.handle(&peer, &topic, &bytes)
                }));
            }
        }

        let total = handles.len();
        assert!(total >= 1000);
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        assert_eq!(
            node.dispatcher.metrics().get(WorkObjectCounter::BlockIngress),
            total as u64
        );
        for (i, zone) in zones.iter().enumerate() {
            let backend = node.backend(zone).unwrap();
            // genesis + gossiped chain
            assert_eq!(backend.block_count(), CALLS_PER_ZONE + 1);
            assert_eq!(
                node.reputation.lively_count(&fixtures::peer(i as u8)),
                CALLS_PER_ZONE as u64
            );
        }

        let pool = node.pipeline.pool();
        assert_eq!(pool.acquired(), total as u64);
        assert_eq!(pool.released(), total as u64);
        assert!(pool.idle() <= pool.capacity());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_mixed_kinds() {
        let node = full_node().await;
        let zones = all_zones();
        for zone in &zones {
            node.backend(zone).unwrap().set_synchronized(true);
        }

        let mut handles = Vec::new();
        for (i, zone) in zones.iter().copied().enumerate() {
            for n in 0..CALLS_PER_ZONE {
                let node = Arc::clone(&node);
                let peer = fixtures::peer(i as u8);
                let (kind, payload) = match n % 3 {
                    0 => (
                        WireKind::WorkShare,
                        WireObject::WorkShare(fixtures::work_share(zone, n as u64)),
                    ),
                    1 => (
                        WireKind::Transactions,
                        WireObject::Transactions(vec![fixtures::transaction(n as u64)].into()),
                    ),
                    _ => (
                        WireKind::HeaderView,
                        WireObject::HeaderView(fixtures::genesis(zone).header_view()),
                    ),
                };
                let topic = Topic::new(zone, kind).to_string();
                let bytes = marshal(&payload);
                handles.push(tokio::spawn(async move {
                    node.pipeline.handle(&peer, &topic, &bytes)
                }));
            }
        }

        let total = handles.len() as u64;
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        let per_zone_shares = (0..CALLS_PER_ZONE).filter(|n| n % 3 == 0).count() as u64;
        let per_zone_txs = (0..CALLS_PER_ZONE).filter(|n| n % 3 == 1).count() as u64;
        let metrics = node.dispatcher.metrics();

        assert_eq!(
            metrics.get(WorkObjectCounter::WorkShareIngress),
            per_zone_shares * zones.len() as u64
        );
        // Synchronized zones drop header views.
        assert_eq!(metrics.get(WorkObjectCounter::HeaderIngress), 0);
        for zone in &zones {
            let backend = node.backend(zone).unwrap();
            assert_eq!(backend.accepted_work_shares(), per_zone_shares);
            assert_eq!(backend.accepted_transactions(), per_zone_txs);
            assert!(backend.is_fully_synchronized());
        }

        let pool = node.pipeline.pool();
        assert_eq!(pool.acquired(), total);
        assert_eq!(pool.released(), total);
        assert_eq!(node.reputation.banned_count(), 0);
    }
}
