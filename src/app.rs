// src/app.rs
use crate::backend::Backend;
use crate::config::AppConfig;
use crate::db::connection::Database;

/// Shared state handed to every request.
pub struct App {
    pub db: Database,
    pub backend: Box<dyn Backend>,
    pub config: AppConfig,
}
