use serde::{Deserialize, Serialize};
use anyhow::Result;
use std::env;

use crate::models::{WeightKey, WeightVector};
use crate::strategy::AdmissionCriteria;

/// Endpoints tried in order when `POOL_ENDPOINTS` is not set
pub const DEFAULT_ENDPOINTS: [&str; 3] = [
    "https://dlmm-api.meteora.ag/pair/all",
    "https://dlmm-api.meteora.ag/pair/all_with_pagination?limit=500",
    "https://dlmm-api.meteora.ag/pair/all_by_groups",
];

/// Configuration for the Meteora pool ranker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Pool list endpoints in priority order
    pub endpoints: Vec<String>,
    /// TVL a pool must exceed to be shown
    pub min_tvl: f64,
    /// 24h volume a pool must exceed to be shown
    pub min_volume_24h: f64,
    pub min_bin_step: u32,
    /// Per-request deadline in seconds
    pub request_timeout_secs: u64,
    /// Initial score weights
    pub weights: WeightVector,
}

impl Default for Config {
    fn default() -> Self {
        let admission = AdmissionCriteria::default();
        Self {
            endpoints: DEFAULT_ENDPOINTS.iter().map(|url| url.to_string()).collect(),
            min_tvl: admission.min_tvl,
            min_volume_24h: admission.min_volume_24h,
            min_bin_step: admission.min_bin_step,
            request_timeout_secs: 15,
            weights: WeightVector::default(),
        }
    }
}

impl Config {
    /// Admission thresholds described by this configuration
    pub fn admission(&self) -> AdmissionCriteria {
        AdmissionCriteria {
            min_tvl: self.min_tvl,
            min_volume_24h: self.min_volume_24h,
            min_bin_step: self.min_bin_step,
        }
    }
}

/// Loads configuration from environment variables, falling back to default values
pub fn load_config() -> Result<Config> {
    load_config_from(|key| env::var(key).ok())
}

/// Same as [`load_config`] with an explicit variable lookup
pub fn load_config_from<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::default();

    if let Some(endpoints) = lookup("POOL_ENDPOINTS") {
        let endpoints: Vec<String> = endpoints
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(String::from)
            .collect();
        if !endpoints.is_empty() {
            config.endpoints = endpoints;
        }
    }

    if let Some(value) = parse_var::<f64, _>(&lookup, "MIN_TVL") {
        config.min_tvl = value;
    }

    if let Some(value) = parse_var::<f64, _>(&lookup, "MIN_VOLUME_24H") {
        config.min_volume_24h = value;
    }

    if let Some(value) = parse_var::<u32, _>(&lookup, "MIN_BIN_STEP") {
        config.min_bin_step = value.max(1);
    }

    if let Some(value) = parse_var::<u64, _>(&lookup, "REQUEST_TIMEOUT_SECS") {
        config.request_timeout_secs = value;
    }

    for key in WeightKey::ALL {
        let var = format!("WEIGHT_{}", key.as_str().to_uppercase());
        if let Some(value) = parse_var::<f64, _>(&lookup, &var) {
            config.weights.set(key, value);
        }
    }

    Ok(config)
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)?.trim().parse::<T>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_config_from(|key| vars.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]);
        assert_eq!(config.endpoints.len(), DEFAULT_ENDPOINTS.len());
        assert_eq!(config.admission(), AdmissionCriteria::default());
        assert_eq!(config.weights, WeightVector::default());
        assert_eq!(config.request_timeout_secs, 15);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("POOL_ENDPOINTS", " https://a.test/pools, ,https://b.test/pairs "),
            ("MIN_TVL", "5000"),
            ("MIN_BIN_STEP", "0"),
            ("WEIGHT_DEPTH", "0.9"),
            ("WEIGHT_RUG_RISK", "0.25"),
        ]);

        assert_eq!(config.endpoints, vec!["https://a.test/pools", "https://b.test/pairs"]);
        assert_eq!(config.min_tvl, 5000.0);
        assert_eq!(config.min_bin_step, 1);
        assert_eq!(config.weights.depth, 0.9);
        assert_eq!(config.weights.rug_risk, 0.25);
    }

    #[test]
    fn test_unparsable_values_keep_defaults() {
        let config = load(&[("MIN_VOLUME_24H", "lots"), ("REQUEST_TIMEOUT_SECS", "-1")]);
        assert_eq!(config.min_volume_24h, 100.0);
        assert_eq!(config.request_timeout_secs, 15);
    }
}
