use std::sync::Arc;

use chrono::{Local, NaiveDate};
use sqlx::SqlitePool;

use crate::api::LibraryApi;
use crate::config::DeskConfig;
use crate::lookup::BookLookup;
use crate::services::DeskService;

#[derive(Clone)]
pub struct AppState {
    pub store: SqlitePool,
    pub api: Arc<dyn LibraryApi>,
    pub lookup: Arc<dyn BookLookup>,
    pub config: Arc<DeskConfig>,
    /// Calendar day used for due dates, registration dates and fines.
    pub today: fn() -> NaiveDate,
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl AppState {
    pub fn desk(&self) -> DeskService {
        DeskService::new(self.api.clone(), self.lookup.clone())
    }
}
