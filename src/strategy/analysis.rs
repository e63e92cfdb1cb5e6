use serde::{Deserialize, Serialize};

use crate::models::{NormalizedPool, WeightVector};

/// Fee APR above this ratio (200%) no longer raises the score
pub const FEE_APR_CAP: f64 = 2.0;
/// Divides `ln(tvl + 1)` so typical TVLs land roughly in [0, 1]
pub const DEPTH_NORMALIZER: f64 = 20.0;

/// Score one pool under a weight vector.
///
/// The in-range, volatility and rug-risk inputs are placeholder constants
/// today, so their weights shift every pool by the same amount and do not
/// change the ordering. With any of those weights nonzero the absolute value
/// differs from the plain fee + depth sum by
/// `0.85 * in_range + 0.5 * volatility_fit - 0 * rug_risk`. Rug risk is a
/// penalty and is subtracted.
pub fn score(pool: &NormalizedPool, weights: &WeightVector) -> f64 {
    let fee = pool.fee_apr_estimate.min(FEE_APR_CAP) / FEE_APR_CAP * weights.fee_apr;
    let depth = pool.depth_score / DEPTH_NORMALIZER * weights.depth;
    let in_range = pool.in_range_ratio_7d * weights.in_range;
    let volatility = pool.volatility_fit * weights.volatility_fit;
    let rug_risk = pool.rug_risk_penalty * weights.rug_risk;

    fee + depth + in_range + volatility - rug_risk
}

/// A pool paired with the score it earned in one evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPool {
    #[serde(flatten)]
    pub pool: NormalizedPool,
    pub score: f64,
}

impl ScoredPool {
    pub fn new(pool: NormalizedPool, weights: &WeightVector) -> Self {
        let score = score(&pool, weights);
        Self { pool, score }
    }
}

/// Minimum liquidity a pool needs before it is shown at all
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdmissionCriteria {
    /// TVL must be strictly above this
    pub min_tvl: f64,
    /// 24h volume must be strictly above this
    pub min_volume_24h: f64,
    pub min_bin_step: u32,
}

impl Default for AdmissionCriteria {
    fn default() -> Self {
        Self {
            min_tvl: 1_000.0,
            min_volume_24h: 100.0,
            min_bin_step: 1,
        }
    }
}

impl AdmissionCriteria {
    pub fn admits(&self, pool: &NormalizedPool) -> bool {
        pool.tvl > self.min_tvl
            && pool.volume_24h > self.min_volume_24h
            && pool.bin_step >= self.min_bin_step.max(1)
    }

    /// Keep only admitted pools, preserving order
    pub fn apply(&self, pools: Vec<NormalizedPool>) -> Vec<NormalizedPool> {
        pools.into_iter().filter(|pool| self.admits(pool)).collect()
    }
}
