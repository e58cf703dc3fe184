mod api;
mod middleware;

use std::sync::Arc;

use intellibrief_db::PgBriefStore;
use intellibrief_signals::SignalCollector;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = intellibrief_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = intellibrief_db::PoolConfig::from_app_config(&config);
    let pool =
        intellibrief_db::connect_pool(config.require_database_url()?, pool_config).await?;
    let applied = intellibrief_db::run_migrations(&pool).await?;
    tracing::info!(applied, env = %config.env, "database ready");

    let collector = SignalCollector::from_credentials(&config.credentials, &config.user_agent)?;
    tracing::info!(
        news_live = collector.news.is_live(),
        jobs_live = collector.jobs.is_live(),
        tone_live = collector.tone.is_live(),
        "signal collectors configured"
    );

    let app = build_app(AppState {
        store: Arc::new(PgBriefStore::new(pool)),
        collector: Arc::new(collector),
        simulation_seed: config.simulation_seed,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "intellibrief-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
