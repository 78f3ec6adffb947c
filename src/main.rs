use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_desk::api::LibraryHttpClient;
use library_desk::config::DeskConfig;
use library_desk::lookup::GoogleBooksClient;
use library_desk::routes::router;
use library_desk::state::{AppState, local_today};
use library_desk::store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "library_desk=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DeskConfig::new_from_env()?;

    let pool = store::connect(&config.database_url).await?;
    info!("local store ready at {}", config.database_url);

    let api = Arc::new(LibraryHttpClient::new(config.api_base_url.clone())?);
    let lookup = Arc::new(GoogleBooksClient::new(&config)?);
    info!("library api at {}", config.api_base_url);

    let addr = config.addr;
    let state = AppState {
        store: pool,
        api,
        lookup,
        config: Arc::new(config),
        today: local_today,
    };

    let app = router(state);

    info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
