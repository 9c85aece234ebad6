use gymlog::{load_data, persist_data, resolve_data_dir, router, AppState, KvStore};
use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_dir = resolve_data_dir()?;
    fs::create_dir_all(&data_dir).await?;

    let store = KvStore::new(data_dir);
    let (data, previous_version) = load_data(&store).await;
    if let Some(previous) = &previous_version {
        info!("app updated from {previous} to {}", data.app_version);
    }
    if let Err(err) = persist_data(&store, &data).await {
        warn!("could not persist repaired state at startup: {}", err.message);
    }
    let state = AppState::new(store, data, previous_version);

    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
