use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
    pub recipe_api: RecipeApiConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let host = std::env::var("DB_HOST").context("DB_HOST is not set")?;
                let port = std::env::var("DB_PORT").unwrap_or_else(|_| "5432".into());
                let name = std::env::var("DB_NAME").context("DB_NAME is not set")?;
                let user = std::env::var("DB_USER").context("DB_USER is not set")?;
                let password = std::env::var("DB_PASSWORD").context("DB_PASSWORD is not set")?;
                format!("postgres://{user}:{password}@{host}:{port}/{name}")
            }
        };
        let session = SessionConfig {
            secret: std::env::var("SECRET_KEY").context("SECRET_KEY is not set")?,
            ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let recipe_api = RecipeApiConfig {
            api_key: std::env::var("API_KEY").context("API_KEY is not set")?,
            base_url: std::env::var("RECIPE_API_BASE")
                .unwrap_or_else(|_| "https://api.spoonacular.com".into()),
            timeout_seconds: std::env::var("RECIPE_API_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30),
        };
        Ok(Self {
            database_url,
            session,
            recipe_api,
        })
    }
}
