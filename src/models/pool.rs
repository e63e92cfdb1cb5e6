use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Placeholder 7-day in-range ratio until a real data source exists
pub const DEFAULT_IN_RANGE_RATIO: f64 = 0.85;
/// Placeholder volatility fit until a real data source exists
pub const DEFAULT_VOLATILITY_FIT: f64 = 0.5;
/// Placeholder rug-risk penalty until a real data source exists
pub const DEFAULT_RUG_RISK_PENALTY: f64 = 0.0;

/// Where a pool's bin histogram came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinSource {
    /// Per-bin liquidity reported by the upstream API
    Live,
    /// Display-only placeholder generated locally
    Synthetic,
}

/// A Meteora DLMM pool in the canonical shape the rest of the crate consumes.
///
/// Produced only by the record normalizer; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPool {
    /// Pool address
    pub id: String,
    /// Display label, e.g. "SOL / USDC"
    pub pair_label: String,
    pub is_stable: bool,
    pub is_major: bool,
    pub is_new: bool,
    /// Total value locked in USD
    pub tvl: f64,
    pub volume_24h: f64,
    pub volume_7d: f64,
    /// Fee APR as a ratio (0.38 = 38%)
    pub fee_apr_estimate: f64,
    /// `ln(tvl + 1)`
    pub depth_score: f64,
    pub bin_step: u32,
    pub current_price_bin_index: usize,
    pub bins: Vec<f64>,
    pub bin_source: BinSource,
    pub in_range_ratio_7d: f64,
    pub volatility_fit: f64,
    pub rug_risk_penalty: f64,
    pub created_at: Option<DateTime<Utc>>,
}

impl NormalizedPool {
    /// Whether the bins are a real distribution
    pub fn has_live_bins(&self) -> bool {
        self.bin_source == BinSource::Live
    }
}

/// Depth transform applied to TVL
pub fn depth_score(tvl: f64) -> f64 {
    (tvl.max(0.0) + 1.0).ln()
}
