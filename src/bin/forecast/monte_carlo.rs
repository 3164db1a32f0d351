// Traffic Uncertainty: N evaluations per scenario with jittered channel traffic
// Each run scales every channel's traffic by an independent uniform factor in
// [1 - jitter, 1 + jitter] and records the monthly revenue delta.

use fare_forecast::adapter::{from_money, to_decimal};
use fare_forecast::{ModelConfig, Scenario};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::report::Stats;

/// Copy of `model` with every channel's traffic scaled by a random factor.
/// A non-positive or non-finite `jitter` leaves traffic untouched.
pub fn jitter_traffic(model: &ModelConfig, rng: &mut ChaCha8Rng, jitter: f64) -> ModelConfig {
    let mut jittered = model.clone();
    if !jitter.is_finite() || jitter <= 0.0 {
        return jittered;
    }
    for ch in &mut jittered.channels {
        let factor = rng.gen_range((1.0 - jitter)..=(1.0 + jitter));
        ch.traffic = ch.traffic.saturating_mul(to_decimal(factor));
    }
    jittered
}

/// Monthly revenue delta of one jittered evaluation, or `None` when the
/// jittered model fails validation.
pub fn run_single(
    model: &ModelConfig,
    scenario: &Scenario,
    seed: u64,
    jitter: f64,
) -> Option<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut jittered = jitter_traffic(model, &mut rng, jitter);
    jittered.scenario = scenario.clone();
    match jittered.forecast() {
        Ok(result) => Some(from_money(result.delta().revenue)),
        Err(e) => {
            tracing::warn!(seed, error = %e, "jittered run rejected");
            None
        }
    }
}

/// Run Monte Carlo: N runs of a scenario with seeds `base_seed..base_seed + N`.
/// Rejected runs are left out of the statistics.
pub fn run_monte_carlo(
    model: &ModelConfig,
    scenario: &Scenario,
    n_runs: usize,
    base_seed: u64,
    jitter: f64,
) -> Stats {
    let samples: Vec<f64> = (0..n_runs)
        .filter_map(|i| run_single(model, scenario, base_seed + i as u64, jitter))
        .collect();
    Stats::from_samples(&samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fare_forecast::{TargetChannel, TargetSegment, ValidationMode};
    use rust_decimal_macros::dec;

    fn price_rise() -> Scenario {
        Scenario {
            target_channel: TargetChannel::All,
            target_segment: TargetSegment::Both,
            yield_impact: dec!(5),
            ..Scenario::default()
        }
    }

    #[test]
    fn zero_jitter_is_deterministic() {
        let model = ModelConfig::default();
        let stats = run_monte_carlo(&model, &price_rise(), 5, 0, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert!(stats.mean > 0.0);
    }

    #[test]
    fn same_seed_same_result() {
        let model = ModelConfig::default();
        let a = run_single(&model, &price_rise(), 7, 0.2);
        let b = run_single(&model, &price_rise(), 7, 0.2);
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn nan_jitter_leaves_traffic_untouched() {
        let model = ModelConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let jittered = jitter_traffic(&model, &mut rng, f64::NAN);
        assert_eq!(jittered.channels, model.channels);
    }

    #[test]
    fn rejected_runs_are_skipped() {
        let mut model = ModelConfig { validation: ValidationMode::Strict, ..ModelConfig::default() };
        model.channels[0].conversion_rate = dec!(150);
        assert_eq!(run_single(&model, &price_rise(), 0, 0.1), None);
        let stats = run_monte_carlo(&model, &price_rise(), 4, 0, 0.1);
        assert_eq!(stats.n, 0);
        assert_eq!(stats.mean, 0.0);
    }

    #[test]
    fn jitter_stays_within_band() {
        let model = ModelConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let jittered = jitter_traffic(&model, &mut rng, 0.1);
        for (orig, new) in model.channels.iter().zip(&jittered.channels) {
            assert!(new.traffic >= orig.traffic * dec!(0.9));
            assert!(new.traffic <= orig.traffic * dec!(1.1));
        }
    }
}
