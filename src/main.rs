use std::net::SocketAddr;

use anyhow::Context;

use todos_api::{
    config::AppConfig, db::connection, logging::init_tracing, routes::app,
    services::ServiceContext, state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // Config errors happen before the subscriber exists.
        eprintln!("server failed: {err:?}");
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env().context("failed to load config")?;
    init_tracing(&cfg.logging);

    let db_cfg = cfg
        .database
        .as_ref()
        .context("database config is required (set APP_DATABASE__URL)")?;
    let db = connection::connect(db_cfg).await?;
    let services = ServiceContext::new(&db);

    let addr: SocketAddr = format!("{}:{}", cfg.general.host, cfg.general.port)
        .parse()
        .context("invalid host/port")?;
    let state = AppState::new(cfg, services);
    let app = app(state);

    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
