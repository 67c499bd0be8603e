//! Cache-backed fan-out ranking.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{debug, instrument};

use affinity_cache::TtlCache;
use affinity_core::{
    AffinityError, CollectionProvider, CompareResult, OwnedCollection, RankingResponse, Result,
};

use crate::compare::compare;

/// TTL configuration for the ranker's two caches.
#[derive(Clone, Debug)]
pub struct RankerConfig {
    /// Renewal window for cached owned collections.
    pub collection_ttl: Duration,
    /// Renewal window for cached peer lists.
    pub peer_list_ttl: Duration,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            collection_ttl: Duration::from_secs(30 * 60),
            peer_list_ttl: Duration::from_secs(5 * 60),
        }
    }
}

/// Orchestrates the per-peer fan-out of fetch-and-compare operations.
///
/// Every upstream read goes through a sliding-TTL cache: a hit renews the
/// entry and skips the fetch, a miss fetches through the provider and
/// writes the result back. The caches are exposed so sweepers can be bound
/// to them.
pub struct Ranker<P> {
    provider: Arc<P>,
    collections: Arc<TtlCache<OwnedCollection>>,
    peer_lists: Arc<TtlCache<Vec<String>>>,
}

// Manual impl: `P` itself need not be `Clone` behind the `Arc`.
impl<P> Clone for Ranker<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            collections: Arc::clone(&self.collections),
            peer_lists: Arc::clone(&self.peer_lists),
        }
    }
}

impl<P: CollectionProvider + 'static> Ranker<P> {
    /// Creates a ranker over `provider` with fresh caches.
    pub fn new(provider: Arc<P>, config: RankerConfig) -> Self {
        Self {
            provider,
            collections: Arc::new(TtlCache::new(config.collection_ttl)),
            peer_lists: Arc::new(TtlCache::new(config.peer_list_ttl)),
        }
    }

    /// The owned-collection cache, for sweeper wiring.
    pub fn collections(&self) -> Arc<TtlCache<OwnedCollection>> {
        Arc::clone(&self.collections)
    }

    /// The peer-list cache, for sweeper wiring.
    pub fn peer_lists(&self) -> Arc<TtlCache<Vec<String>>> {
        Arc::clone(&self.peer_lists)
    }

    /// Fetches an owned collection through the cache.
    pub async fn owned_collection(&self, id: &str) -> Result<OwnedCollection> {
        if self.collections.is_hit(id) {
            debug!(id, "Collection cache hit");
            return Ok(self.collections.read(id));
        }

        let collection = self.provider.fetch_owned_collection(id).await?;
        self.collections.write(id, collection.clone());
        Ok(collection)
    }

    /// Fetches a subject's peer list through the cache.
    pub async fn peer_list(&self, subject_id: &str) -> Result<Vec<String>> {
        if self.peer_lists.is_hit(subject_id) {
            debug!(subject_id, "Peer list cache hit");
            return Ok(self.peer_lists.read(subject_id));
        }

        let peers = self.provider.fetch_peer_list(subject_id).await?;
        self.peer_lists.write(subject_id, peers.clone());
        Ok(peers)
    }

    /// Ranks every peer of `subject_id` by affinity.
    ///
    /// Spawns one task per peer (unbounded fan-out), joins them all, and
    /// sorts the results by affinity descending with peer id as the
    /// deterministic tie-break. Fail-fast: the first fetch error aborts
    /// the whole ranking and no partial result is returned.
    #[instrument(skip(self))]
    pub async fn rank(&self, subject_id: &str, include_items: bool) -> Result<RankingResponse> {
        let subject = Arc::new(self.owned_collection(subject_id).await?);
        let peers = self.peer_list(subject_id).await?;
        let expected = peers.len();

        let mut tasks: JoinSet<Result<CompareResult>> = JoinSet::new();
        for peer_id in peers {
            let ranker = self.clone();
            let subject = Arc::clone(&subject);

            tasks.spawn(async move {
                let peer = ranker.owned_collection(&peer_id).await?;
                Ok(compare(&subject, &peer, include_items))
            });
        }

        let mut ranking = Vec::with_capacity(expected);
        while let Some(joined) = tasks.join_next().await {
            let result = joined
                .map_err(|err| AffinityError::Internal(format!("peer task failed: {err}")))??;
            ranking.push(result);
        }

        debug!(subject_id, peers = ranking.len(), "Fan-out joined");

        ranking.sort_by(|a, b| {
            b.affinity
                .partial_cmp(&a.affinity)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.peer_id.cmp(&b.peer_id))
        });

        Ok(RankingResponse { ranking })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    use async_trait::async_trait;

    use affinity_core::Item;

    /// Fixture provider backed by in-memory maps, counting every fetch.
    struct FixtureProvider {
        collections: HashMap<String, OwnedCollection>,
        peers: HashMap<String, Vec<String>>,
        collection_fetches: AtomicUsize,
    }

    impl FixtureProvider {
        fn new() -> Self {
            Self {
                collections: HashMap::new(),
                peers: HashMap::new(),
                collection_fetches: AtomicUsize::new(0),
            }
        }

        fn with_collection(mut self, owner: &str, ids: &[u64]) -> Self {
            let items = ids.iter().map(|&id| Item::new(id, format!("game-{id}"))).collect();
            self.collections
                .insert(owner.to_string(), OwnedCollection::new(owner, items));
            self
        }

        fn with_peers(mut self, subject: &str, peers: &[&str]) -> Self {
            self.peers.insert(
                subject.to_string(),
                peers.iter().map(|p| p.to_string()).collect(),
            );
            self
        }
    }

    #[async_trait]
    impl CollectionProvider for FixtureProvider {
        async fn fetch_peer_list(&self, subject_id: &str) -> Result<Vec<String>> {
            self.peers
                .get(subject_id)
                .cloned()
                .ok_or_else(|| AffinityError::invalid_identifier(subject_id))
        }

        async fn fetch_owned_collection(&self, id: &str) -> Result<OwnedCollection> {
            self.collection_fetches.fetch_add(1, AtomicOrdering::SeqCst);
            self.collections
                .get(id)
                .cloned()
                .ok_or_else(|| AffinityError::invalid_identifier(id))
        }
    }

    fn ranker(provider: FixtureProvider) -> Ranker<FixtureProvider> {
        Ranker::new(Arc::new(provider), RankerConfig::default())
    }

    #[tokio::test]
    async fn test_rank_returns_one_result_per_peer() {
        let provider = FixtureProvider::new()
            .with_collection("subject", &[1, 2, 3])
            .with_collection("p1", &[1])
            .with_collection("p2", &[1, 2])
            .with_collection("p3", &[7])
            .with_peers("subject", &["p1", "p2", "p3"]);

        let response = ranker(provider).rank("subject", false).await.unwrap();

        assert_eq!(response.ranking.len(), 3);
    }

    #[tokio::test]
    async fn test_rank_sorted_by_affinity_descending() {
        let provider = FixtureProvider::new()
            .with_collection("subject", &[1, 2, 3, 4])
            .with_collection("low", &[1])
            .with_collection("high", &[1, 2, 3, 4])
            .with_collection("mid", &[1, 2])
            .with_peers("subject", &["low", "high", "mid"]);

        let response = ranker(provider).rank("subject", false).await.unwrap();

        for pair in response.ranking.windows(2) {
            assert!(pair[0].affinity >= pair[1].affinity);
        }
        assert_eq!(response.ranking[0].peer_id, "high");
    }

    #[tokio::test]
    async fn test_equal_affinity_breaks_ties_by_peer_id() {
        let provider = FixtureProvider::new()
            .with_collection("subject", &[1, 2])
            .with_collection("zeta", &[1, 2])
            .with_collection("alpha", &[1, 2])
            .with_peers("subject", &["zeta", "alpha"]);

        let response = ranker(provider).rank("subject", false).await.unwrap();

        assert_eq!(response.ranking[0].peer_id, "alpha");
        assert_eq!(response.ranking[1].peer_id, "zeta");
    }

    #[tokio::test]
    async fn test_rank_fails_fast_on_bad_peer() {
        let provider = FixtureProvider::new()
            .with_collection("subject", &[1])
            .with_collection("good", &[1])
            .with_peers("subject", &["good", "missing"]);

        let err = ranker(provider).rank("subject", false).await.unwrap_err();

        assert!(err.is_invalid_identifier());
    }

    #[tokio::test]
    async fn test_rank_fails_on_unknown_subject() {
        let provider = FixtureProvider::new();
        let err = ranker(provider).rank("nobody", false).await.unwrap_err();
        assert!(err.is_invalid_identifier());
    }

    #[tokio::test]
    async fn test_rank_with_no_peers_is_empty() {
        let provider = FixtureProvider::new()
            .with_collection("subject", &[1])
            .with_peers("subject", &[]);

        let response = ranker(provider).rank("subject", false).await.unwrap();

        assert!(response.ranking.is_empty());
    }

    #[tokio::test]
    async fn test_second_rank_served_from_cache() {
        let provider = FixtureProvider::new()
            .with_collection("subject", &[1, 2])
            .with_collection("p1", &[1])
            .with_peers("subject", &["p1"]);

        let ranker = ranker(provider);
        ranker.rank("subject", false).await.unwrap();
        let after_first = ranker
            .provider
            .collection_fetches
            .load(AtomicOrdering::SeqCst);

        ranker.rank("subject", false).await.unwrap();
        let after_second = ranker
            .provider
            .collection_fetches
            .load(AtomicOrdering::SeqCst);

        // subject + p1 fetched once; the second rank hits the cache only
        assert_eq!(after_first, 2);
        assert_eq!(after_second, 2);
    }

    #[tokio::test]
    async fn test_include_items_flows_through() {
        let provider = FixtureProvider::new()
            .with_collection("subject", &[1, 2])
            .with_collection("p1", &[2])
            .with_peers("subject", &["p1"]);

        let response = ranker(provider).rank("subject", true).await.unwrap();

        let items = response.ranking[0].matching_items.as_ref().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 2);
    }

    #[tokio::test]
    async fn test_wide_fan_out() {
        let mut provider = FixtureProvider::new().with_collection("subject", &[1, 2, 3]);
        let peer_ids: Vec<String> = (0..64).map(|i| format!("peer-{i:02}")).collect();
        for id in &peer_ids {
            provider = provider.with_collection(id, &[1, 2]);
        }
        provider = provider.with_peers(
            "subject",
            &peer_ids.iter().map(String::as_str).collect::<Vec<_>>(),
        );

        let response = ranker(provider).rank("subject", false).await.unwrap();

        assert_eq!(response.ranking.len(), 64);
        // All affinities equal, so the tie-break yields lexicographic order
        assert_eq!(response.ranking[0].peer_id, "peer-00");
        assert_eq!(response.ranking[63].peer_id, "peer-63");
    }
}
