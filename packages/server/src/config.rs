use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Optional so a read-only API deployment can run without crawl
    /// credentials; [`Config::naver_credentials`] enforces them where needed.
    pub naver_client_id: Option<String>,
    pub naver_client_secret: Option<String>,
    pub search_keyword: String,
    pub crawl_schedule: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            naver_client_id: env::var("NAVER_CLIENT_ID").ok(),
            naver_client_secret: env::var("NAVER_CLIENT_SECRET").ok(),
            search_keyword: env::var("SEARCH_KEYWORD")
                .unwrap_or_else(|_| "프리스타일 리브레2".to_string()),
            // Twice daily: midnight and noon
            crawl_schedule: env::var("CRAWL_SCHEDULE")
                .unwrap_or_else(|_| "0 0 0,12 * * *".to_string()),
        })
    }

    /// Naver API credential pair, required for any crawling process.
    pub fn naver_credentials(&self) -> Result<(String, String)> {
        let id = self
            .naver_client_id
            .clone()
            .context("NAVER_CLIENT_ID must be set")?;
        let secret = self
            .naver_client_secret
            .clone()
            .context("NAVER_CLIENT_SECRET must be set")?;
        Ok((id, secret))
    }
}
