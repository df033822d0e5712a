use storefront_api::{app, config, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Storefront API in {:?} mode", config.environment);

    // Connect and create tables plus unique indexes before serving
    database::bootstrap::ensure_schema().await?;
    tracing::info!("Connected to database");

    let app = app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    println!("🚀 Storefront API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
