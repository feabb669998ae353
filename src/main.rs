use test_platform_api::config::Config;
use test_platform_api::{AppState, app, db};
use tokio::net::TcpListener; //TCP listener
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main] // the program entry point using the Tokio async runtime.
async fn main() {
    dotenvy::dotenv().ok(); //loads environment variables

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let pool = db::establish_connection(&config.database_url, config.max_connections).await?;
    db::init_db(&pool).await?;
    info!(max_connections = config.max_connections, "database ready");

    let listener = TcpListener::bind(config.bind_address).await?;
    info!("Server listening on http://{}", config.bind_address);

    axum::serve(listener, app(AppState { pool })).await?;
    Ok(())
}
