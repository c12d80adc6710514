//! Songbook backend - music library REST service
//!
//! CRUD over groups, songs and song details, with ILIKE filtering and
//! offset pagination. The API surface lives under `api`, data access
//! under `db`.

pub mod api;
pub mod config;
pub mod db;
pub mod error;

use std::sync::Arc;

use crate::config::Config;
use crate::db::Database;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
}
