use chair_monitor::{
    clock::SystemClock,
    random::ThreadRandom,
    router,
    storage::JsonFileStorage,
    ticker::{spawn_step_ticker, spawn_vitals_ticker},
    vitals::VitalsMonitor,
    AppState, Config, DailyDataStore,
};
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
    if let Some(parent) = config.data_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    info!(
        path = %config.data_path.display(),
        persist_defaults = config.persist_defaults,
        "using daily data file"
    );

    let store = DailyDataStore::new(
        JsonFileStorage::new(&config.data_path),
        SystemClock,
        ThreadRandom,
    )
    .persist_defaults(config.persist_defaults);
    let state = AppState::new(store, VitalsMonitor::new(ThreadRandom));

    let _step_ticker = spawn_step_ticker(state.clone(), config.step_interval);
    let _vitals_ticker = spawn_vitals_ticker(state.clone(), config.vitals_interval);

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
