use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User-tunable weights for the pool score.
///
/// Weights are not required to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub fee_apr: f64,
    pub depth: f64,
    pub in_range: f64,
    pub volatility_fit: f64,
    pub rug_risk: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            fee_apr: 0.6,
            depth: 0.4,
            in_range: 0.0,
            volatility_fit: 0.0,
            rug_risk: 0.0,
        }
    }
}

impl WeightVector {
    pub fn get(&self, key: WeightKey) -> f64 {
        match key {
            WeightKey::FeeApr => self.fee_apr,
            WeightKey::Depth => self.depth,
            WeightKey::InRange => self.in_range,
            WeightKey::VolatilityFit => self.volatility_fit,
            WeightKey::RugRisk => self.rug_risk,
        }
    }

    /// Set one weight; negative and non-finite values clamp to 0
    pub fn set(&mut self, key: WeightKey, value: f64) {
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        match key {
            WeightKey::FeeApr => self.fee_apr = value,
            WeightKey::Depth => self.depth = value,
            WeightKey::InRange => self.in_range = value,
            WeightKey::VolatilityFit => self.volatility_fit = value,
            WeightKey::RugRisk => self.rug_risk = value,
        }
    }
}

impl fmt::Display for WeightVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in WeightKey::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {:.2}", key.label(), self.get(*key))?;
        }
        Ok(())
    }
}

/// Names one entry of a [`WeightVector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightKey {
    FeeApr,
    Depth,
    InRange,
    VolatilityFit,
    RugRisk,
}

impl WeightKey {
    pub const ALL: [WeightKey; 5] = [
        WeightKey::FeeApr,
        WeightKey::Depth,
        WeightKey::InRange,
        WeightKey::VolatilityFit,
        WeightKey::RugRisk,
    ];

    /// Human-readable label for sliders and tables
    pub fn label(&self) -> &'static str {
        match self {
            WeightKey::FeeApr => "Fee APR (Est.)",
            WeightKey::Depth => "Depth (TVL)",
            WeightKey::InRange => "In-Range Ratio",
            WeightKey::VolatilityFit => "Volatility Fit",
            WeightKey::RugRisk => "Rug Risk",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightKey::FeeApr => "fee_apr",
            WeightKey::Depth => "depth",
            WeightKey::InRange => "in_range",
            WeightKey::VolatilityFit => "volatility_fit",
            WeightKey::RugRisk => "rug_risk",
        }
    }
}

impl fmt::Display for WeightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeightKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown weight: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clamps_negative_and_nan() {
        let mut weights = WeightVector::default();
        weights.set(WeightKey::Depth, -3.0);
        assert_eq!(weights.depth, 0.0);
        weights.set(WeightKey::FeeApr, f64::NAN);
        assert_eq!(weights.fee_apr, 0.0);
        weights.set(WeightKey::RugRisk, 2.5);
        assert_eq!(weights.get(WeightKey::RugRisk), 2.5);
    }

    #[test]
    fn test_weight_key_round_trips_through_str() {
        for key in WeightKey::ALL {
            assert_eq!(key.as_str().parse::<WeightKey>().unwrap(), key);
        }
        assert!("liquidity".parse::<WeightKey>().is_err());
    }

    #[test]
    fn test_display_lists_every_weight_by_label() {
        let mut weights = WeightVector::default();
        weights.set(WeightKey::RugRisk, 0.25);
        assert_eq!(
            weights.to_string(),
            "Fee APR (Est.) 0.60, Depth (TVL) 0.40, In-Range Ratio 0.00, Volatility Fit 0.00, Rug Risk 0.25"
        );
    }
}
