// Fare Forecast Scenario Runner
// Preset what-if scenarios, traffic-uncertainty Monte Carlo, fare-mix comparison
//
// Usage:
//   cargo run --release --bin forecast                         # Default model, all presets
//   cargo run --release --bin forecast -- --config model.json  # Load channel model
//   cargo run --release --bin forecast -- --fare-mix fares.json
//   cargo run --release --bin forecast -- --runs 50 --jitter 15
//   cargo run --release --bin forecast -- PRICING              # Filter by name/category

mod monte_carlo;
mod report;
mod scenarios;

use fare_forecast::adapter::{fare_mix_view, from_decimal, from_money, ImpactView};
use fare_forecast::{logging, ConfigError, FareMixConfig, Horizon, ModelConfig};
use report::*;
use scenarios::*;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    config: Option<PathBuf>,
    fare_mix: Option<PathBuf>,
    runs: usize,
    seed: u64,
    /// Traffic jitter in percent.
    jitter: f64,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        config: None,
        fare_mix: None,
        runs: 30,
        seed: 0,
        jitter: 10.0,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                cli.config = args.get(i).map(PathBuf::from);
            }
            "--fare-mix" => {
                i += 1;
                cli.fare_mix = args.get(i).map(PathBuf::from);
            }
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(30);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--jitter" => {
                i += 1;
                if i < args.len() {
                    cli.jitter = args[i]
                        .parse()
                        .ok()
                        .filter(|j: &f64| j.is_finite() && *j >= 0.0)
                        .unwrap_or_else(|| {
                            tracing::warn!(value = %args[i], "invalid --jitter, using 10");
                            10.0
                        });
                }
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                tracing::warn!(arg = %args[i], "unknown argument");
            }
        }
        i += 1;
    }

    cli
}

fn load_inputs(cli: &CliArgs) -> Result<(ModelConfig, FareMixConfig), ConfigError> {
    let model = match &cli.config {
        Some(path) => ModelConfig::load(path)?,
        None => ModelConfig::default(),
    };
    let fare_mix = match &cli.fare_mix {
        Some(path) => FareMixConfig::load(path)?,
        None => sample_fare_mix(),
    };
    Ok((model, fare_mix))
}

fn write_report(report: &ForecastReport) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dir = std::path::Path::new("forecast-results");
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("forecast-{}.json", report.timestamp));
    std::fs::write(&path, serde_json::to_string_pretty(report)?)?;
    Ok(path)
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    logging::init();
    let cli = parse_args();

    let (model, fare_mix) = match load_inputs(&cli) {
        Ok(inputs) => inputs,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let all_presets = presets();
    let to_run: Vec<&Preset> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_presets.iter()
                .filter(|p| p.name.to_lowercase().contains(&f_lower)
                          || p.label.to_lowercase().contains(&f_lower)
                          || p.category.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_presets.iter().collect(),
    };

    if to_run.is_empty() {
        tracing::error!(filter = ?cli.filter, "no scenarios match filter");
        std::process::exit(1);
    }

    let jitter = cli.jitter / 100.0;

    println!("\n  Fare Forecast Scenario Runner v0.2.0");
    println!("  PRNG: ChaCha8Rng | Runs/scenario: {} | Base seed: {} | Traffic jitter: ±{}%",
        cli.runs, cli.seed, cli.jitter);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<30} {:>12} {:>14} {:>14} {:>16} {:>14}",
        "Scenario", "PAX/month", "Rev/week", "Rev/month", "Rev/year", "±95% (month)");
    println!("  {}", "-".repeat(106));

    let mut scenario_reports = Vec::new();

    for preset in &to_run {
        let mut evaluated = model.clone();
        evaluated.scenario = preset.scenario.clone();
        let result = match evaluated.forecast() {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(scenario = preset.name, error = %e, "scenario rejected");
                continue;
            }
        };

        let uncertainty = monte_carlo::run_monte_carlo(
            &model,
            &preset.scenario,
            cli.runs,
            cli.seed,
            jitter,
        );
        let impacts: Vec<ImpactView> = Horizon::all()
            .iter()
            .map(|&h| ImpactView::from(&result.impact(h)))
            .collect();
        let half_ci = (uncertainty.ci_upper - uncertainty.ci_lower) / 2.0;

        println!("  {:<30} {:>+12.0} {:>+14.0} {:>+14.0} {:>+16.0} {:>14.0}",
            preset.label,
            impacts[1].pax,
            impacts[0].revenue,
            impacts[1].revenue,
            impacts[2].revenue,
            half_ci,
        );

        scenario_reports.push(ScenarioReport {
            name: preset.name.to_string(),
            label: preset.label.to_string(),
            category: preset.category.to_string(),
            baseline_pax: from_decimal(result.baseline.passengers),
            baseline_revenue: from_money(result.baseline.revenue),
            simulated_pax: from_decimal(result.simulated.passengers),
            simulated_revenue: from_money(result.simulated.revenue),
            impacts,
            revenue_delta_uncertainty: uncertainty,
            impacted_channels: result.channel_details.iter()
                .filter(|d| d.impacted)
                .map(|d| d.id.0.clone())
                .collect(),
        });
    }

    println!("  {}", "-".repeat(106));

    // ─── Fare Mix ───────────────────────────────────────────────────────

    let fares = match fare_mix.compare() {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "fare-mix comparison rejected");
            std::process::exit(1);
        }
    };

    println!("\n  Fare Mix: baseline vs challenger (annual volume {})", fare_mix.inputs.target_volume);
    println!("  {:<20} {:>16} {:>16} {:>14} {:>12} {:>12}",
        "Product", "Baseline rev", "Challenger rev", "Δ/month", "Base PAX", "Chal PAX");
    println!("  {}", "-".repeat(96));
    for p in &fares.products {
        println!("  {:<20} {:>16.0} {:>16.0} {:>+14.0} {:>12.0} {:>12.0}",
            p.name,
            from_money(p.baseline_revenue),
            from_money(p.challenger_revenue),
            from_money(p.monthly_delta),
            from_decimal(p.baseline_pax),
            from_decimal(p.challenger_pax),
        );
    }
    println!("  {}", "-".repeat(96));
    println!("  {:<20} {:>16.0} {:>16.0} {:>+14.0} {:>12.0} {:>12.0}",
        "Total",
        from_money(fares.baseline_revenue),
        from_money(fares.challenger_revenue),
        from_money(fares.monthly_delta()),
        from_decimal(fares.baseline_pax),
        from_decimal(fares.challenger_pax),
    );
    println!("  Share sums: baseline {} ({}), challenger {} ({})\n",
        fares.baseline_share.total,
        if fares.baseline_share.valid { "OK" } else { "INVALID" },
        fares.challenger_share.total,
        if fares.challenger_share.valid { "OK" } else { "INVALID" },
    );

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    let report = ForecastReport {
        timestamp: ts.to_string(),
        version: "0.2.0",
        prng: "ChaCha8Rng",
        n_runs_per_scenario: cli.runs,
        traffic_jitter_pct: cli.jitter,
        scenarios: scenario_reports,
        fare_mix: fare_mix_view(&fares),
    };

    match write_report(&report) {
        Ok(path) => println!("  Results saved to: {}\n", path.display()),
        Err(e) => {
            tracing::error!(error = %e, "failed to write report");
            std::process::exit(1);
        }
    }
}
