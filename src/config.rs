use std::env;
use std::net::SocketAddr;

use crate::error::AppError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";

#[derive(Clone, Debug)]
pub struct DeskConfig {
    pub api_base_url: String,
    pub google_books_url: String,
    pub google_books_api_key: Option<String>,
    pub database_url: String,
    pub addr: SocketAddr,
    pub username: String,
    pub password: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            google_books_url: DEFAULT_GOOGLE_BOOKS_URL.to_string(),
            google_books_api_key: None,
            database_url: "sqlite://library_desk.db?mode=rwc".to_string(),
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            username: "admin".to_string(),
            password: "123".to_string(),
        }
    }
}

impl DeskConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let addr = match env::var("DESK_ADDR") {
            Ok(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|e| AppError::Config(format!("DESK_ADDR {:?} is invalid: {}", raw, e)))?,
            Err(_) => defaults.addr,
        };

        Ok(Self {
            api_base_url: env::var("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            google_books_url: env::var("GOOGLE_BOOKS_URL").unwrap_or(defaults.google_books_url),
            google_books_api_key: env::var("GOOGLE_BOOKS_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            addr,
            username: env::var("DESK_USERNAME").unwrap_or(defaults.username),
            password: env::var("DESK_PASSWORD").unwrap_or(defaults.password),
        })
    }
}
