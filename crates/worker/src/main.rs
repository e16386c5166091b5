use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fxfolio_core::config::Settings;
use fxfolio_core::notify::{MemoryNotifier, Notification, Notifier};
use fxfolio_core::random::SystemRandom;
use fxfolio_core::services::refresh::{RefreshOutcome, RefreshReport};
use fxfolio_core::services::Services;
use fxfolio_core::storage::Store;

#[derive(Debug, Parser)]
#[command(name = "fxfolio_worker")]
struct Args {
    /// Number of refresh cycles to run.
    #[arg(long, default_value_t = 1)]
    cycles: u32,

    /// Pause between cycles.
    #[arg(long, default_value_t = 0)]
    interval_secs: u64,

    /// Seed for the simulated feeds. Overrides RNG_SEED.
    #[arg(long)]
    seed: Option<u64>,

    /// Collect notifications into the report instead of sending them.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CycleReport {
    cycle: u32,
    #[serde(flatten)]
    report: RefreshReport,
    rates_updated: usize,
    recommendations_stored: usize,
    alerts_raised: usize,
    forecasts: usize,
}

impl CycleReport {
    fn new(cycle: u32, outcome: &RefreshOutcome) -> Self {
        Self {
            cycle,
            report: outcome.report(),
            rates_updated: outcome.rates.len(),
            recommendations_stored: outcome.recommendations.len(),
            alerts_raised: outcome.alerts.len(),
            forecasts: outcome.forecasts.len(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport {
    seed: Option<u64>,
    cycles: Vec<CycleReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notifications: Vec<Notification>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.cycles > 0, "--cycles must be at least 1");

    let seed = args.seed.or(settings.rng_seed);
    let memory = Arc::new(MemoryNotifier::new());
    let notifier: Arc<dyn Notifier> = if args.dry_run {
        memory.clone()
    } else {
        fxfolio_core::notify::from_settings(&settings)?
    };

    let services = Services::new(
        Arc::new(Store::seeded()),
        Arc::new(SystemRandom::from_optional_seed(seed)),
        notifier,
    );

    let mut cycles = Vec::with_capacity(args.cycles as usize);
    for cycle in 1..=args.cycles {
        if cycle > 1 {
            if args.interval_secs > 0 {
                tokio::time::sleep(Duration::from_secs(args.interval_secs)).await;
            }
            // Each cycle sees a freshly simulated market.
            services.ai.clear_market_cache();
        }

        let outcome = match services.refresh_all().await {
            Ok(outcome) => outcome,
            Err(err) => {
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(cycle, error = %format!("{err:#}"), "refresh cycle failed");
                return Err(err);
            }
        };
        tracing::info!(
            cycle,
            recommendations = outcome.recommendations.len(),
            alerts = outcome.alerts.len(),
            "refresh cycle done"
        );
        cycles.push(CycleReport::new(cycle, &outcome));
    }

    let report = RunReport {
        seed,
        cycles,
        notifications: memory.sent(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxfolio_core::random::ScriptedRandom;

    #[test]
    fn defaults_to_one_cycle() {
        let args = Args::try_parse_from(["fxfolio_worker"]).unwrap();
        assert_eq!(args.cycles, 1);
        assert_eq!(args.interval_secs, 0);
        assert!(args.seed.is_none());
        assert!(!args.dry_run);

        let args = Args::try_parse_from([
            "fxfolio_worker",
            "--cycles",
            "3",
            "--seed",
            "42",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(args.cycles, 3);
        assert_eq!(args.seed, Some(42));
        assert!(args.dry_run);
    }

    #[tokio::test]
    async fn cycle_report_flattens_refresh_status() {
        let services = Services::new(
            Arc::new(Store::seeded()),
            Arc::new(ScriptedRandom::constant(0.5)),
            Arc::new(MemoryNotifier::new()),
        );
        let outcome = services.refresh_all().await.unwrap();
        let value = serde_json::to_value(CycleReport::new(1, &outcome)).unwrap();

        assert_eq!(value["cycle"], 1);
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "All data refreshed successfully");
        assert_eq!(value["ratesUpdated"], 3);
        assert_eq!(value["forecasts"], 3);
    }
}
