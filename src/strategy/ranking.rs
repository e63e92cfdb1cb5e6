use serde::{Deserialize, Serialize};

use crate::models::{Category, NormalizedPool, WeightVector};
use crate::strategy::analysis::ScoredPool;

/// View filters applied before sorting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankQuery {
    pub category: Category,
    /// Case-insensitive substring of the pair label or address; blank matches all
    pub search: String,
}

impl RankQuery {
    pub fn new(category: Category, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    pub fn matches(&self, pool: &NormalizedPool) -> bool {
        self.category.matches(pool) && matches_search(pool, &self.search)
    }
}

/// Whether `term` appears in the pool's pair label or address, ignoring case
pub fn matches_search(pool: &NormalizedPool, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty()
        || pool.pair_label.to_lowercase().contains(&term)
        || pool.id.to_lowercase().contains(&term)
}

/// Score, filter and sort pools, highest score first.
///
/// The sort is stable so equal scores keep their input order.
pub fn rank(pools: &[NormalizedPool], weights: &WeightVector, query: &RankQuery) -> Vec<ScoredPool> {
    let mut ranked: Vec<ScoredPool> = pools
        .iter()
        .filter(|pool| query.matches(pool))
        .map(|pool| ScoredPool::new(pool.clone(), weights))
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
