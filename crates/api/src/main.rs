use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fxfolio_core::config::Settings;
use fxfolio_core::random::SystemRandom;
use fxfolio_core::services::Services;
use fxfolio_core::storage::Store;

mod error;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let notifier = match fxfolio_core::notify::from_settings(&settings) {
        Ok(notifier) => notifier,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(
                error = %format!("{e:#}"),
                "notifier setup failed; logging notifications instead"
            );
            Arc::new(fxfolio_core::notify::LogNotifier)
        }
    };
    if let Some(seed) = settings.rng_seed {
        tracing::info!(seed, "simulation seeded");
    }

    let services = Services::new(
        Arc::new(Store::seeded()),
        Arc::new(SystemRandom::from_optional_seed(settings.rng_seed)),
        notifier,
    );
    let state = routes::AppState {
        services,
        user_id: settings.default_user_id,
    };
    let app = routes::router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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
