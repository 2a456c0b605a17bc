//! # Gossip Flow Tests
//!
//! Raw gossip bytes through the full node stack:
//!
//! ```text
//! bytes ──▶ GossipPipeline ──▶ admission filter ──▶ dispatcher ──▶ InMemoryBackend
//!                                                       │
//!                                                       └──▶ InMemoryReputation, metrics
//! ```

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use node_runtime::{NodeConfig, NodeContainer, NodeRuntime};
    use qc_18_wire_codec::{marshal, Topic, WireKind, WireObject};
    use quantum_telemetry::{encode_metrics, WorkObjectCounter};
    use shared_types::{Location, Transactions};

    use crate::fixtures::{self, generate_chain};

    async fn started_node() -> Arc<NodeContainer> {
        let runtime = NodeRuntime::new(NodeConfig::default()).unwrap();
        runtime.start().await.unwrap();
        runtime.container()
    }

    fn topic(location: Location, kind: WireKind) -> String {
        Topic::new(location, kind).to_string()
    }

    fn count(node: &NodeContainer, counter: WorkObjectCounter) -> u64 {
        node.dispatcher.metrics().get(counter)
    }

    #[tokio::test]
    async fn test_block_gossip_reaches_backend() {
        let node = started_node().await;
        let zone = Location::zone(0, 0);
        let backend = node.backend(&zone).unwrap();
        let peer = fixtures::peer(1);

        let chain = generate_chain(&fixtures::genesis(zone), 3, |i, gen| {
            gen.add_transaction(fixtures::transaction(i as u64));
        });
        for block in &chain {
            let bytes = marshal(&WireObject::BlockView(block.block_view()));
            assert!(node
                .pipeline
                .handle(&peer, &topic(zone, WireKind::BlockView), &bytes));
        }

        // genesis + 3 gossiped
        assert_eq!(backend.block_count(), 4);
        for block in &chain {
            let stored = node.registry.lookup_block(&block.hash(), &zone).unwrap();
            assert_eq!(stored.as_ref(), Some(block));
        }
        assert_eq!(count(&node, WorkObjectCounter::BlockIngress), 3);
        assert_eq!(node.reputation.lively_count(&peer), 3);
        assert!(!node.reputation.is_banned(&peer));
    }

    #[tokio::test]
    async fn test_header_view_only_feeds_syncing_zone() {
        let node = started_node().await;
        let peer = fixtures::peer(2);

        let zone = Location::zone(0, 0);
        let zone_block = &generate_chain(&fixtures::genesis(zone), 1, |_, gen| {
            gen.add_transaction(fixtures::transaction(9));
        })[0];
        let bytes = marshal(&WireObject::HeaderView(zone_block.header_view()));
        assert!(node
            .pipeline
            .handle(&peer, &topic(zone, WireKind::HeaderView), &bytes));

        let stored = node
            .registry
            .lookup_block(&zone_block.hash(), &zone)
            .unwrap()
            .unwrap();
        assert!(stored.body.transactions.is_empty());
        assert_eq!(count(&node, WorkObjectCounter::HeaderIngress), 1);

        // Region headers are dropped silently.
        let region = Location::region(0);
        let region_block = &generate_chain(&fixtures::genesis(region), 1, |_, _| {})[0];
        let bytes = marshal(&WireObject::HeaderView(region_block.header_view()));
        assert!(node
            .pipeline
            .handle(&peer, &topic(region, WireKind::HeaderView), &bytes));
        assert!(node
            .registry
            .lookup_block(&region_block.hash(), &region)
            .unwrap()
            .is_none());
        assert_eq!(count(&node, WorkObjectCounter::HeaderIngress), 1);
        assert_eq!(node.reputation.lively_count(&peer), 1);

        // Once synchronized, zone headers are dropped as well.
        node.backend(&zone).unwrap().set_synchronized(true);
        let next = &generate_chain(zone_block, 1, |_, _| {})[0];
        let bytes = marshal(&WireObject::HeaderView(next.header_view()));
        assert!(node
            .pipeline
            .handle(&peer, &topic(zone, WireKind::HeaderView), &bytes));
        assert!(node.registry.lookup_block(&next.hash(), &zone).unwrap().is_none());
        assert_eq!(count(&node, WorkObjectCounter::HeaderIngress), 1);
    }

    #[tokio::test]
    async fn test_transactions_need_synchronized_backend() {
        let node = started_node().await;
        let zone = Location::zone(0, 0);
        let backend = node.backend(&zone).unwrap();
        let peer = fixtures::peer(3);

        let batch = Transactions((0..5).map(fixtures::transaction).collect());
        let bytes = marshal(&WireObject::Transactions(batch));
        let t = topic(zone, WireKind::Transactions);

        assert!(node.pipeline.handle(&peer, &t, &bytes));
        assert_eq!(backend.accepted_transactions(), 0);

        backend.set_synchronized(true);
        assert!(node.pipeline.handle(&peer, &t, &bytes));
        assert_eq!(backend.accepted_transactions(), 5);

        // Transaction batches touch neither counters nor liveness.
        assert_eq!(node.dispatcher.metrics().total_work_objects(), 0);
        assert_eq!(node.reputation.lively_count(&peer), 0);
    }

    #[tokio::test]
    async fn test_work_share_counted_even_when_backend_rejects() {
        let node = started_node().await;
        let zone = Location::zone(0, 0);
        let backend = node.backend(&zone).unwrap();
        let peer = fixtures::peer(4);
        let t = topic(zone, WireKind::WorkShare);

        let good = marshal(&WireObject::WorkShare(fixtures::work_share(zone, 1)));
        let foreign = marshal(&WireObject::WorkShare(fixtures::work_share(
            Location::zone(0, 1),
            2,
        )));

        assert!(node.pipeline.handle(&peer, &t, &good));
        assert!(node.pipeline.handle(&peer, &t, &foreign));

        assert_eq!(backend.accepted_work_shares(), 1);
        assert_eq!(count(&node, WorkObjectCounter::WorkShareIngress), 2);
        assert_eq!(node.reputation.lively_count(&peer), 2);
    }

    #[tokio::test]
    async fn test_unrecognized_kind_bans_peer() {
        let node = started_node().await;
        let peer = fixtures::peer(5);

        let bytes = marshal(&WireObject::Hash([3u8; 32]));
        assert!(!node
            .pipeline
            .handle(&peer, &topic(Location::zone(0, 0), WireKind::Hash), &bytes));
        assert!(node.reputation.is_banned(&peer));

        // Banned even when the location is not hosted.
        let other = fixtures::peer(6);
        let tx = marshal(&WireObject::Transaction(fixtures::transaction(1)));
        assert!(!node
            .pipeline
            .handle(&other, &topic(Location::zone(3, 3), WireKind::Transaction), &tx));
        assert!(node.reputation.is_banned(&other));
        assert_eq!(node.reputation.banned_count(), 2);
    }

    #[tokio::test]
    async fn test_unhosted_block_is_rejected_without_ban() {
        let node = started_node().await;
        let peer = fixtures::peer(7);
        let unhosted = Location::zone(2, 1);

        let block = &generate_chain(&fixtures::genesis(unhosted), 1, |_, _| {})[0];
        let bytes = marshal(&WireObject::BlockView(block.block_view()));

        assert!(!node
            .pipeline
            .handle(&peer, &topic(unhosted, WireKind::BlockView), &bytes));
        assert!(!node.reputation.is_banned(&peer));
        assert_eq!(node.reputation.lively_count(&peer), 0);
        assert_eq!(node.dispatcher.metrics().total_work_objects(), 0);
    }

    #[tokio::test]
    async fn test_unhosted_declaration_on_hosted_topic_is_rejected() {
        let node = started_node().await;
        let peer = fixtures::peer(10);
        let hosted = Location::zone(0, 0);
        let backend = node.backend(&hosted).unwrap();

        let block = &generate_chain(&fixtures::genesis(Location::zone(2, 1)), 1, |_, _| {})[0];
        let bytes = marshal(&WireObject::BlockView(block.block_view()));

        assert!(!node
            .pipeline
            .handle(&peer, &topic(hosted, WireKind::BlockView), &bytes));
        // genesis only
        assert_eq!(backend.block_count(), 1);
        assert_eq!(node.reputation.lively_count(&peer), 0);
        assert_eq!(node.dispatcher.metrics().total_work_objects(), 0);

        let pool = node.pipeline.pool();
        assert_eq!(pool.acquired(), pool.released());
    }

    #[tokio::test]
    async fn test_garbage_and_bad_topics_ban_nobody() {
        let node = started_node().await;
        let peer = fixtures::peer(8);

        assert!(!node.pipeline.handle(&peer, "zone-0-0/blocks", &[0xFF, 0xFF, 0xFF]));
        assert!(!node.pipeline.handle(&peer, "zone-0-0/unknown", &[]));
        assert!(!node.pipeline.handle(&peer, "nowhere/blocks", &[]));
        assert!(!node.reputation.is_banned(&peer));

        let pool = node.pipeline.pool();
        assert_eq!(pool.acquired(), pool.released());
    }

    #[tokio::test]
    async fn test_metrics_are_exposed() {
        let node = started_node().await;
        let zone = Location::zone(0, 0);
        let block = &generate_chain(&fixtures::genesis(zone), 1, |_, _| {})[0];
        let bytes = marshal(&WireObject::BlockView(block.block_view()));
        node.pipeline
            .handle(&fixtures::peer(9), &topic(zone, WireKind::BlockView), &bytes);

        let text = encode_metrics(&node.metrics_registry).unwrap();
        assert!(text.contains("qc_work_object_total"));
        assert!(text.contains("blocks/ingress"));
    }
}
