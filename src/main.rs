use perk_points::dice::{Dice, RandomDice};
use perk_points::{load_ledger, router, AppState, Config};
use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let ledger = load_ledger(&config.data_path, &config.username).await;
    info!(
        path = %config.data_path.display(),
        points = ledger.total_points,
        streak = ledger.day_streak,
        "ledger loaded"
    );

    let dice: Box<dyn Dice + Send + Sync> = match config.rng_seed {
        Some(seed) => {
            info!(seed, "using seeded dice");
            Box::new(RandomDice::seeded(seed))
        }
        None => Box::new(RandomDice::from_entropy()),
    };

    let state = AppState::new(config.data_path.clone(), config.rules.clone(), ledger, dice);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
