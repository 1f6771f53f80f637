pub mod database;

use std::env;
use anyhow::{Context, Result};
use sqlx::PgPool;

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base URL of the storage service, without a trailing slash.
    pub base_url: String,
    pub service_key: String,
    pub blog_bucket: String,
    pub car_bucket: String,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: env::var("STORAGE_URL")
                .context("STORAGE_URL must be set")?
                .trim_end_matches('/')
                .to_string(),
            service_key: env::var("STORAGE_SERVICE_KEY").context("STORAGE_SERVICE_KEY must be set")?,
            blog_bucket: env::var("BLOG_IMAGE_BUCKET").unwrap_or_else(|_| "blog-images".to_string()),
            car_bucket: env::var("CAR_IMAGE_BUCKET").unwrap_or_else(|_| "car-images".to_string()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub database_pool: PgPool,
    pub run_migrations: bool,
    pub storage: StorageConfig,
    pub admin_token: String,
}

impl AppConfig {
    pub async fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        );

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        let database_pool = database::create_pool(max_connections).await?;

        let admin_token = env::var("ADMIN_TOKEN").context("ADMIN_TOKEN must be set")?;
        if admin_token.trim().is_empty() {
            anyhow::bail!("ADMIN_TOKEN must not be empty");
        }

        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            cors_origins,
            database_pool,
            run_migrations: parse_flag(env::var("RUN_MIGRATIONS").ok().as_deref(), true),
            storage: StorageConfig::from_env()?,
            admin_token,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match raw.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if v == "true" || v == "1" || v == "yes" => true,
        Some(v) if v == "false" || v == "0" || v == "no" => false,
        _ => default,
    }
}
