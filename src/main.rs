use axum::serve;
use jurassic_park::api::AppState;
use jurassic_park::config::AppConfig;
use jurassic_park::{connect_stores, routes, seed};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with explicit filter to suppress sqlx debug logs
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info) // Default to Info for everything
        .filter_module("sqlx", LevelFilter::Warn) // Suppress sqlx Debug logs
        .parse_default_env()
        .init();

    println!("Jurassic Park: Cage, Dinosaur and Species Service");

    // Load configuration
    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: server={}:{} backend={:?}",
        config.server.host, config.server.port, config.database.backend
    );

    let stores = connect_stores(&config).await?;
    let state = AppState::new(stores);

    // Load seed data for demonstration (optional)
    if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        println!("Loading seed data...");
        seed::load_seed_data(&state).await?;
        println!("Seed data loaded successfully");
    }

    let app = routes::create_router().with_state(state);
    run_server(app, &config).await?;

    Ok(())
}

async fn run_server(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    println!("Jurassic Park server running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
