//! Maps one raw API pool record onto [`NormalizedPool`].
//!
//! Identity fields (address and both token symbols) are mandatory; a record
//! missing any of them is dropped. Every other field degrades to its default
//! independently.

use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde_json::Value;

use crate::meteora::bins;
use crate::meteora::extract::{
    coerce_number, date_field, first_present, number_field, string_field,
};
use crate::models::pool::{
    DEFAULT_IN_RANGE_RATIO, DEFAULT_RUG_RISK_PENALTY, DEFAULT_VOLATILITY_FIT,
};
use crate::models::{depth_score, BinSource, NormalizedPool};
use crate::utils::percent_to_ratio;

/// Tokens that make a pair a "major"
pub const MAJOR_TOKENS: [&str; 3] = ["SOL", "USDC", "USDT"];

/// How recently a pool must have been created to count as new
pub const NEW_POOL_WINDOW_DAYS: i64 = 7;

/// A live distribution needs more bins than this to be used
const MIN_LIVE_BINS: usize = 5;

const ADDRESS: &[&str] = &[
    "address",
    "pair_address",
    "pairAddress",
    "pool_address",
    "poolAddress",
    "pubkey",
    "id",
    "pool.address",
];

const TOKEN_X_SYMBOL: &[&str] = &[
    "token_x_symbol",
    "tokenXSymbol",
    "token_x.symbol",
    "tokenX.symbol",
    "mint_x_symbol",
    "base_symbol",
    "baseToken.symbol",
    "base_token.symbol",
    "tokens.0.symbol",
];

const TOKEN_Y_SYMBOL: &[&str] = &[
    "token_y_symbol",
    "tokenYSymbol",
    "token_y.symbol",
    "tokenY.symbol",
    "mint_y_symbol",
    "quote_symbol",
    "quoteToken.symbol",
    "quote_token.symbol",
    "tokens.1.symbol",
];

const NAME: &[&str] = &["name", "pair_name", "pairName", "label"];

// Nested paths come before their bare parent so an object-valued `liquidity`
// does not shadow `liquidity.usd`.
const TVL: &[&str] = &[
    "liquidity.usd",
    "liquidity",
    "tvl",
    "liquidity_usd",
    "liquidityUsd",
    "tvl_usd",
    "tvlUsd",
    "total_liquidity",
    "reserve_in_usd",
    "stats.tvl",
    "stats.liquidity",
    "metrics.tvl",
    "metrics.liquidity",
];

const VOLUME_24H: &[&str] = &[
    "volume.h24",
    "volume.24h",
    "volume_24h",
    "volume24h",
    "trade_volume_24h",
    "tradeVolume24h",
    "today_volume",
    "stats.volume_24h",
    "stats.volume24h",
    "metrics.volume_24h",
    "metrics.volume.h24",
];

const VOLUME_7D: &[&str] = &[
    "volume.d7",
    "volume.7d",
    "volume_7d",
    "volume7d",
    "trade_volume_7d",
    "tradeVolume7d",
    "stats.volume_7d",
    "stats.volume7d",
    "metrics.volume_7d",
];

/// Fee APR fields, all reported as percentages
const FEE_APR_PERCENT: &[&str] = &[
    "fee_apr_24h",
    "feeApr24h",
    "fee_apr",
    "feeApr",
    "apr",
    "stats.fee_apr",
    "stats.apr",
    "metrics.fee_apr",
    "metrics.apr",
];

const BIN_STEP: &[&str] = &[
    "bin_step",
    "binStep",
    "pool_config.bin_step",
    "parameters.bin_step",
];

const ACTIVE_BIN: &[&str] = &[
    "current_bin_id",
    "currentBinId",
    "active_id",
    "activeId",
    "active_bin_id",
    "activeBinId",
];

const CREATED_AT: &[&str] = &[
    "created_at",
    "createdAt",
    "pair_created_at",
    "pairCreatedAt",
    "launch_time",
    "stats.created_at",
];

const DISTRIBUTION: &[&str] = &[
    "liquidity_distribution",
    "liquidityDistribution",
    "bin_liquidity",
    "binLiquidity",
    "bins",
    "distribution",
];

const BIN_ID: &[&str] = &["bin_id", "binId", "id"];
const AMOUNT_X: &[&str] = &["amount_x", "amountX", "x_amount", "reserve_x"];
const AMOUNT_Y: &[&str] = &["amount_y", "amountY", "y_amount", "reserve_y"];

/// Normalize a record against the current time
pub fn normalize(raw: &Value) -> Option<NormalizedPool> {
    normalize_at(raw, Utc::now(), &mut fastrand::Rng::new())
}

/// Normalize a record with an explicit clock and randomness source.
///
/// Returns `None` when the address or either token symbol is missing.
pub fn normalize_at(
    raw: &Value,
    now: DateTime<Utc>,
    rng: &mut fastrand::Rng,
) -> Option<NormalizedPool> {
    let id = string_field(raw, ADDRESS);
    let symbol_x = string_field(raw, TOKEN_X_SYMBOL);
    let symbol_y = string_field(raw, TOKEN_Y_SYMBOL);

    let (id, symbol_x, symbol_y) = match (id, symbol_x, symbol_y) {
        (Some(id), Some(x), Some(y)) => (id, x, y),
        (id, x, y) => {
            debug!(
                "Dropping record without identity (address: {:?}, x: {:?}, y: {:?})",
                id, x, y
            );
            return None;
        }
    };

    let pair_label = format!("{} / {}", symbol_x, symbol_y);
    let name = string_field(raw, NAME).unwrap_or_else(|| pair_label.clone());

    let tvl = non_negative(number_field(raw, TVL, 0.0));
    let created_at = date_field(raw, CREATED_AT);
    let is_new = created_at
        .map(|created| now.signed_duration_since(created) < Duration::days(NEW_POOL_WINDOW_DAYS))
        .unwrap_or(false);

    let (bins, current_price_bin_index, bin_source) = match read_distribution(raw) {
        Some(distribution) => {
            let index = active_bin(raw)
                .and_then(|active| distribution.iter().position(|(bin_id, _)| *bin_id == active))
                .unwrap_or(distribution.len() / 2);
            let bins = distribution.into_iter().map(|(_, amount)| amount).collect();
            (bins, index, BinSource::Live)
        }
        None => {
            let center = bins::default_center(bins::SYNTHETIC_BIN_COUNT);
            let synthetic = bins::synthesize_bins(rng, bins::SYNTHETIC_BIN_COUNT, center);
            (synthetic, center, BinSource::Synthetic)
        }
    };

    Some(NormalizedPool {
        is_stable: name.to_lowercase().contains("stable"),
        is_major: is_major_token(&symbol_x) || is_major_token(&symbol_y),
        is_new,
        id,
        pair_label,
        tvl,
        volume_24h: non_negative(number_field(raw, VOLUME_24H, 0.0)),
        volume_7d: non_negative(number_field(raw, VOLUME_7D, 0.0)),
        fee_apr_estimate: non_negative(percent_to_ratio(number_field(raw, FEE_APR_PERCENT, 0.0))),
        depth_score: depth_score(tvl),
        bin_step: bin_step(raw),
        current_price_bin_index,
        bins,
        bin_source,
        in_range_ratio_7d: DEFAULT_IN_RANGE_RATIO,
        volatility_fit: DEFAULT_VOLATILITY_FIT,
        rug_risk_penalty: DEFAULT_RUG_RISK_PENALTY,
        created_at,
    })
}

/// Whether a symbol is one of the major tokens (case-insensitive)
pub fn is_major_token(symbol: &str) -> bool {
    MAJOR_TOKENS
        .iter()
        .any(|major| major.eq_ignore_ascii_case(symbol.trim()))
}

fn non_negative(value: f64) -> f64 {
    value.max(0.0)
}

fn bin_step(raw: &Value) -> u32 {
    let step = number_field(raw, BIN_STEP, 1.0).round();
    step.clamp(1.0, u32::MAX as f64) as u32
}

fn active_bin(raw: &Value) -> Option<i64> {
    let value = coerce_number(first_present(raw, ACTIVE_BIN), f64::NAN);
    value.is_finite().then(|| value.round() as i64)
}

/// Read the per-bin liquidity distribution as `(bin_id, amount_x + amount_y)`
/// sorted by bin id. Accepts an object keyed by bin id or an array of bin
/// entries.
fn read_distribution(raw: &Value) -> Option<Vec<(i64, f64)>> {
    let mut entries: Vec<(i64, f64)> = match first_present(raw, DISTRIBUTION)? {
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, entry)| {
                let bin_id = key
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .or_else(|| entry_bin_id(entry))?;
                Some((bin_id, bin_amount(entry)))
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                let bin_id = entry_bin_id(entry).unwrap_or(position as i64);
                (bin_id, bin_amount(entry))
            })
            .collect(),
        _ => return None,
    };

    if entries.len() <= MIN_LIVE_BINS {
        return None;
    }

    entries.sort_by_key(|(bin_id, _)| *bin_id);
    Some(entries)
}

fn entry_bin_id(entry: &Value) -> Option<i64> {
    if !entry.is_object() {
        return None;
    }
    let value = coerce_number(first_present(entry, BIN_ID), f64::NAN);
    value.is_finite().then(|| value.round() as i64)
}

fn bin_amount(entry: &Value) -> f64 {
    match entry {
        Value::Object(_) => {
            non_negative(number_field(entry, AMOUNT_X, 0.0))
                + non_negative(number_field(entry, AMOUNT_Y, 0.0))
        }
        other => non_negative(coerce_number(Some(other), 0.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-15T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn run(raw: &Value) -> Option<NormalizedPool> {
        normalize_at(raw, now(), &mut fastrand::Rng::with_seed(1))
    }

    fn meteora_record() -> Value {
        json!({
            "address": "8HuU7VxckbncPmjJWszg7SiZnnJ3CZvJ5EEcweavRG7e",
            "name": "SOL-USDC",
            "token_x_symbol": "SOL",
            "token_y_symbol": "USDC",
            "liquidity": "3250000.5",
            "trade_volume_24h": 410000,
            "volume_7d": 2150000,
            "fee_apr_24h": 38,
            "bin_step": 10,
            "created_at": "2024-06-12T00:00:00Z"
        })
    }

    #[test]
    fn test_normalize_meteora_record() {
        let pool = run(&meteora_record()).unwrap();

        assert_eq!(pool.id, "8HuU7VxckbncPmjJWszg7SiZnnJ3CZvJ5EEcweavRG7e");
        assert_eq!(pool.pair_label, "SOL / USDC");
        assert!(pool.is_major);
        assert!(!pool.is_stable);
        assert!(pool.is_new);
        assert_eq!(pool.tvl, 3_250_000.5);
        assert_eq!(pool.volume_24h, 410_000.0);
        assert_eq!(pool.volume_7d, 2_150_000.0);
        assert!((pool.fee_apr_estimate - 0.38).abs() < 1e-12);
        assert!((pool.depth_score - (3_250_001.5f64).ln()).abs() < 1e-12);
        assert_eq!(pool.bin_step, 10);
        assert_eq!(pool.in_range_ratio_7d, 0.85);
        assert_eq!(pool.volatility_fit, 0.5);
        assert_eq!(pool.rug_risk_penalty, 0.0);
    }

    #[test]
    fn test_missing_identity_is_dropped() {
        for field in ["address", "token_x_symbol", "token_y_symbol"] {
            let mut record = meteora_record();
            record.as_object_mut().unwrap().remove(field);
            assert!(run(&record).is_none(), "record without {} survived", field);
        }

        let mut blank = meteora_record();
        blank["token_y_symbol"] = json!("   ");
        assert!(run(&blank).is_none());
    }

    #[test]
    fn test_alternate_schema_with_nested_metrics() {
        let record = json!({
            "pairAddress": "Pool111",
            "baseToken": { "symbol": "jup" },
            "quoteToken": { "symbol": "BONK" },
            "liquidity": { "usd": "$12,500.00" },
            "volume": { "h24": "2,000" },
            "stats": { "volume_7d": 9000, "fee_apr": "12.5%" },
            "binStep": 0
        });

        let pool = run(&record).unwrap();
        assert_eq!(pool.id, "Pool111");
        assert_eq!(pool.pair_label, "jup / BONK");
        assert!(!pool.is_major);
        assert_eq!(pool.tvl, 12_500.0);
        assert_eq!(pool.volume_24h, 2_000.0);
        assert_eq!(pool.volume_7d, 9_000.0);
        assert!((pool.fee_apr_estimate - 0.125).abs() < 1e-12);
        assert_eq!(pool.bin_step, 1);
        assert!(!pool.is_new);
        assert!(pool.created_at.is_none());
    }

    #[test]
    fn test_bad_optional_fields_degrade_to_defaults() {
        let mut record = meteora_record();
        record["liquidity"] = json!("unknown");
        record["trade_volume_24h"] = json!(null);
        record["created_at"] = json!("not a date");
        record["bin_step"] = json!(-4);

        let pool = run(&record).unwrap();
        assert_eq!(pool.tvl, 0.0);
        assert_eq!(pool.depth_score, 0.0);
        assert_eq!(pool.volume_24h, 0.0);
        assert!(pool.created_at.is_none());
        assert!(!pool.is_new);
        assert_eq!(pool.bin_step, 1);
    }

    #[test]
    fn test_stable_and_recency_flags() {
        let mut record = meteora_record();
        record["name"] = json!("USDT-USDC Stable");
        record["created_at"] = json!("2024-05-01T00:00:00Z");

        let pool = run(&record).unwrap();
        assert!(pool.is_stable);
        assert!(!pool.is_new);
    }

    #[test]
    fn test_distribution_object_sorted_by_bin_id() {
        let mut record = meteora_record();
        let mut distribution = serde_json::Map::new();
        for bin_id in [105, 100, 103, 101, 104, 102] {
            distribution.insert(
                bin_id.to_string(),
                json!({ "amount_x": bin_id - 100, "amount_y": "1", "price": 1.0 }),
            );
        }
        record["liquidity_distribution"] = Value::Object(distribution);
        record["current_bin_id"] = json!(103);

        let pool = run(&record).unwrap();
        assert_eq!(pool.bin_source, BinSource::Live);
        assert_eq!(pool.bins, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(pool.current_price_bin_index, 3);
    }

    #[test]
    fn test_distribution_array_with_unknown_active_bin() {
        let mut record = meteora_record();
        record["bins"] = json!([
            { "binId": 7, "amountX": 1, "amountY": 1 },
            { "binId": 2, "amountX": 2, "amountY": 0 },
            { "binId": 5, "amountX": 0, "amountY": 3 },
            { "binId": 3, "amountX": 4, "amountY": 0 },
            { "binId": 9, "amountX": 0, "amountY": 5 },
            { "binId": 1, "amountX": 6, "amountY": 0 },
            { "binId": 4, "amountX": 7, "amountY": 0 }
        ]);
        record["active_id"] = json!(999);

        let pool = run(&record).unwrap();
        assert_eq!(pool.bins, vec![6.0, 2.0, 4.0, 7.0, 3.0, 2.0, 5.0]);
        assert_eq!(pool.current_price_bin_index, 3);
    }

    #[test]
    fn test_short_or_missing_distribution_is_synthesized() {
        let mut record = meteora_record();
        record["liquidity_distribution"] = json!({ "1": { "amount_x": 1, "amount_y": 1 } });

        let pool = run(&record).unwrap();
        assert_eq!(pool.bin_source, BinSource::Synthetic);
        assert_eq!(pool.bins.len(), bins::SYNTHETIC_BIN_COUNT);
        assert_eq!(pool.current_price_bin_index, bins::SYNTHETIC_BIN_COUNT / 2);

        let plain = run(&meteora_record()).unwrap();
        assert!(!plain.has_live_bins());
    }

    #[test]
    fn test_is_major_token_ignores_case() {
        assert!(is_major_token("sol"));
        assert!(is_major_token(" USDT"));
        assert!(!is_major_token("JUP"));
    }
}
