use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::config::DeskConfig;
use crate::store;

pub const SESSION_KEY: &str = "isLoggedIn";
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Plain comparison against the configured desk credentials. No tokens are issued.
pub fn credentials_match(config: &DeskConfig, req: &LoginRequest) -> bool {
    req.username == config.username && req.password == config.password
}

pub async fn is_logged_in(db: &SqlitePool) -> Result<bool, sqlx::Error> {
    Ok(store::get_item(db, SESSION_KEY).await?.as_deref() == Some("true"))
}

pub async fn log_in(db: &SqlitePool) -> Result<(), sqlx::Error> {
    store::set_item(db, SESSION_KEY, "true").await
}

pub async fn log_out(db: &SqlitePool) -> Result<(), sqlx::Error> {
    store::remove_item(db, SESSION_KEY).await?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

pub async fn load_theme(db: &SqlitePool) -> Result<Theme, sqlx::Error> {
    let theme = match store::get_item(db, THEME_KEY).await?.as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    };
    Ok(theme)
}

pub async fn save_theme(db: &SqlitePool, theme: Theme) -> Result<(), sqlx::Error> {
    store::set_item(db, THEME_KEY, theme.as_str()).await
}
