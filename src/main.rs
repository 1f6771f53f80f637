use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zoi_rentals::config::{database, AppConfig};
use zoi_rentals::utils::redact_sensitive;
use zoi_rentals::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Default to INFO; override with RUST_LOG when debugging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "zoi_rentals=info,tower_http=info,sqlx=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().await?;

    if config.run_migrations {
        database::run_migrations(&config.database_pool).await?;
    }

    for origin in &config.cors_origins {
        if origin.starts_with("http://") && !origin.contains("localhost") {
            tracing::warn!("⚠️  Insecure HTTP origin in CORS: {} (use HTTPS in production)", origin);
        }
    }

    tracing::info!(
        "🪣 Object storage at {} (service key {})",
        config.storage.base_url,
        redact_sensitive(&config.storage.service_key)
    );

    let state = AppState::new(&config)?;
    let app = create_app(state, &config.cors_origins);

    let addr = config.server_address();
    tracing::info!("🚗 Starting Zoi Rentals API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
