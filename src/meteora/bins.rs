//! Placeholder liquidity histograms for pools whose API record carries no
//! per-bin distribution. Display only; scoring never reads bins.

/// Number of bins in a synthetic histogram
pub const SYNTHETIC_BIN_COUNT: usize = 20;
/// Lowest value a synthetic bin may take
pub const MIN_SYNTHETIC_BIN: f64 = 5.0;

const PEAK: f64 = 100.0;
const SPREAD: f64 = 0.2;
const NOISE_LOW: f64 = 0.8;
const NOISE_WIDTH: f64 = 0.4;

/// Default center for a histogram of `count` bins
pub fn default_center(count: usize) -> usize {
    count / 2
}

/// Gaussian bump around `center` with per-bin amplitude jitter in [0.8, 1.2)
pub fn synthesize_bins(rng: &mut fastrand::Rng, count: usize, center: usize) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let offset = i as f64 - center as f64;
            let noise = NOISE_LOW + rng.f64() * NOISE_WIDTH;
            (PEAK * (-SPREAD * offset * offset).exp() * noise).max(MIN_SYNTHETIC_BIN)
        })
        .collect()
}

/// Standard 20-bin placeholder centered on the middle bin
pub fn synthesize_default(rng: &mut fastrand::Rng) -> Vec<f64> {
    synthesize_bins(rng, SYNTHETIC_BIN_COUNT, default_center(SYNTHETIC_BIN_COUNT))
}
