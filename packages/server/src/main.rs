use anyhow::Context;
use tracing::info;

use quizbank_server::config::AppConfig;
use quizbank_server::database::init_db;
use quizbank_server::logging::init_logging;
use quizbank_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load config")?;
    init_logging(&config.log).context("Failed to initialize logging")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!(
        max_connections = config.database.max_connections,
        "Database ready"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { db, config };
    let app = quizbank_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
