//! Database connection and operations

pub mod groups;
pub mod lyrics;
pub mod query;
pub mod seed;
pub mod song_details;
pub mod songs;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub use groups::{GroupFilter, GroupRecord, GroupRepository, UpdateGroup};
pub use query::Page;
pub use song_details::{SongDetailsRepository, SongDetailsSummary, UpdateSongDetails};
pub use songs::{SongFilter, SongRecord, SongRepository, UpdateSong};

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database wrapper from an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the maximum connection pool size from environment or default
    fn get_max_connections() -> u32 {
        std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10)
    }

    /// Create a new database connection pool
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(Self::get_max_connections())
            .connect(url)
            .await?;

        Ok(Self { pool })
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get a group repository
    pub fn groups(&self) -> GroupRepository {
        GroupRepository::new(self.pool.clone())
    }

    /// Get a song repository
    pub fn songs(&self) -> SongRepository {
        SongRepository::new(self.pool.clone())
    }

    /// Get a song details repository
    pub fn song_details(&self) -> SongDetailsRepository {
        SongDetailsRepository::new(self.pool.clone())
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}
