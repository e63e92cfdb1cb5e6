use log::info;

use crate::meteora::{FetchOutcome, PayloadSource, PoolFetcher, PoolOrigin, SoftFailure};
use crate::models::{Category, NormalizedPool, WeightKey, WeightVector};
use crate::strategy::analysis::ScoredPool;
use crate::strategy::ranking::{rank, RankQuery};

/// Lifecycle of the pool set held by a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Initializing,
    Ready { origin: PoolOrigin },
}

/// Owns the pool set and the user's view settings.
///
/// All mutation goes through `&mut self`, so a scoring pass never observes a
/// weight vector that is changing underneath it.
#[derive(Debug, Clone)]
pub struct PoolSession {
    pools: Vec<NormalizedPool>,
    weights: WeightVector,
    query: RankQuery,
    status: SessionStatus,
    failures: Vec<SoftFailure>,
}

impl Default for PoolSession {
    fn default() -> Self {
        Self::new(WeightVector::default())
    }
}

impl PoolSession {
    pub fn new(weights: WeightVector) -> Self {
        Self {
            pools: Vec::new(),
            weights,
            query: RankQuery::default(),
            status: SessionStatus::Initializing,
            failures: Vec::new(),
        }
    }

    /// Fetch pools once and make the session ready
    pub async fn load<S: PayloadSource>(&mut self, fetcher: &PoolFetcher<S>) {
        self.status = SessionStatus::Initializing;
        let outcome = fetcher.fetch_all().await;
        self.apply_outcome(outcome);
    }

    /// Install the result of a fetch
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        info!("Session ready with {} pools from {}", outcome.pools.len(), outcome.origin);
        self.pools = outcome.pools;
        self.failures = outcome.failures;
        self.status = SessionStatus::Ready {
            origin: outcome.origin,
        };
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.status, SessionStatus::Ready { .. })
    }

    pub fn pools(&self) -> &[NormalizedPool] {
        &self.pools
    }

    /// Endpoints skipped during the last load
    pub fn failures(&self) -> &[SoftFailure] {
        &self.failures
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn set_weight(&mut self, key: WeightKey, value: f64) {
        self.weights.set(key, value);
    }

    pub fn query(&self) -> &RankQuery {
        &self.query
    }

    pub fn set_category(&mut self, category: Category) {
        self.query.category = category;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    /// Current ranked view; empty until the session is ready
    pub fn view(&self) -> Vec<ScoredPool> {
        if !self.is_ready() {
            return Vec::new();
        }
        rank(&self.pools, &self.weights, &self.query)
    }

    /// One pool with its score under the current weights, ignoring view filters
    pub fn details(&self, id: &str) -> Option<ScoredPool> {
        self.pools
            .iter()
            .find(|pool| pool.id == id)
            .map(|pool| ScoredPool::new(pool.clone(), &self.weights))
    }
}
