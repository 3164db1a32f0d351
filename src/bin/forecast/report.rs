// Forecast Report Types
// Structured JSON output of a runner invocation

use fare_forecast::adapter::{FareMixView, ImpactView};
use serde::Serialize;

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Per-Scenario Result ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub label: String,
    pub category: String,
    pub baseline_pax: f64,
    pub baseline_revenue: f64,
    pub simulated_pax: f64,
    pub simulated_revenue: f64,
    pub impacts: Vec<ImpactView>,
    /// Monthly revenue delta under traffic jitter.
    pub revenue_delta_uncertainty: Stats,
    pub impacted_channels: Vec<String>,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ForecastReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub traffic_jitter_pct: f64,
    pub scenarios: Vec<ScenarioReport>,
    pub fare_mix: FareMixView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_empty_and_constant_samples() {
        assert_eq!(Stats::from_samples(&[]).n, 0);
        let s = Stats::from_samples(&[5.0, 5.0, 5.0]);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.min, 5.0);
        assert_eq!(s.max, 5.0);
    }
}
