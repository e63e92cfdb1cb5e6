use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

/// Addresses of the bundled pools, in dataset order
pub const FALLBACK_ADDRESSES: [&str; 3] = [
    "8HuU7VxckbncPmjJWszg7SiZnnJ3CZvJ5EEcweavRG7e",
    "93DYAVvaLBznwnUZq8jT3uNchxpzs9fsyv9RPrfJ5YLT",
    "6w9RR8BEWMRo2seD1J2x8Y5YeKMi4g5bdnNGNfo5PsK2",
];

/// Representative pools in the Meteora `pair/all` record shape, used when
/// no live endpoint produced a usable batch. Creation times are relative to
/// `now` so the recency flag stays meaningful.
pub fn fallback_records(now: DateTime<Utc>) -> Vec<Value> {
    let days_ago = |days: i64| (now - Duration::days(days)).to_rfc3339();

    vec![
        json!({
            "address": FALLBACK_ADDRESSES[0],
            "name": "SOL / USDC",
            "token_x_symbol": "SOL",
            "token_y_symbol": "USDC",
            "liquidity": 3_250_000.0,
            "volume_24h": 410_000.0,
            "volume_7d": 2_150_000.0,
            "fee_apr_24h": 38.0,
            "bin_step": 10,
            "current_bin_id": 120,
            "created_at": days_ago(3),
        }),
        json!({
            "address": FALLBACK_ADDRESSES[1],
            "name": "JUP / BONK",
            "token_x_symbol": "JUP",
            "token_y_symbol": "BONK",
            "liquidity": 1_850_000.0,
            "volume_24h": 230_000.0,
            "volume_7d": 1_020_000.0,
            "fee_apr_24h": 27.0,
            "bin_step": 15,
            "current_bin_id": 98,
            "created_at": days_ago(12),
        }),
        json!({
            "address": FALLBACK_ADDRESSES[2],
            "name": "USDT / USDC Stable",
            "token_x_symbol": "USDT",
            "token_y_symbol": "USDC",
            "liquidity": 4_650_000.0,
            "volume_24h": 150_000.0,
            "volume_7d": 910_000.0,
            "fee_apr_24h": 12.0,
            "bin_step": 1,
            "current_bin_id": 64,
            "created_at": days_ago(40),
        }),
    ]
}
