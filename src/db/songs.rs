//! Song database repository
//!
//! Creating a song also creates its paired empty song_details row, in one
//! transaction so a failure cannot leave an orphaned song behind.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db::query::{bind_all, bind_all_as, Page, SelectBuilder, SqlArg, UpdateBuilder};
use crate::error::Error;

/// Song record from database
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SongRecord {
    pub id: i32,
    pub name: String,
    pub group_id: i32,
}

/// Input for a partial song update; absent fields stay untouched
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSong {
    pub name: Option<String>,
    pub group_id: Option<i32>,
}

/// Optional substring filters for listing songs.
///
/// `release_date`, `link` and `text` match against the joined
/// song_details row, `group_name` against the owning group.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongFilter {
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub link: Option<String>,
    pub text: Option<String>,
    pub group_name: Option<String>,
}

const SELECT_SONGS_JOINED: &str = "SELECT s.id, s.name, s.group_id \
     FROM songs s \
     JOIN song_details sd ON sd.song_id = s.id \
     JOIN groups g ON g.id = s.group_id";

pub struct SongRepository {
    pool: PgPool,
}

impl SongRepository {
    const TABLE: &'static str = "songs";

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a song plus its empty details row, returning the song id
    pub async fn create(&self, name: &str, group_id: i32) -> Result<i32, Error> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i32,) =
            sqlx::query_as("INSERT INTO songs (name, group_id) VALUES ($1, $2) RETURNING id")
                .bind(name)
                .bind(group_id)
                .fetch_one(&mut *tx)
                .await?;

        sqlx::query("INSERT INTO song_details (song_id) VALUES ($1)")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(id, group_id, "Song created with empty details");
        Ok(id)
    }

    /// List all songs ordered by id
    pub async fn list_all(&self) -> Result<Vec<SongRecord>, Error> {
        let records =
            sqlx::query_as::<_, SongRecord>("SELECT id, name, group_id FROM songs ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(records)
    }

    /// List one page of songs matching the filter set.
    ///
    /// Filters are conjunctive, so each one only narrows the result; no
    /// filters at all returns every song (paginated).
    pub async fn list_filtered(
        &self,
        filter: &SongFilter,
        page: &Page,
    ) -> Result<Vec<SongRecord>, Error> {
        let (sql, args) = SelectBuilder::new(SELECT_SONGS_JOINED, "s.id")
            .ilike("s.name", filter.name.as_deref())
            .ilike("sd.release_date", filter.release_date.as_deref())
            .ilike("sd.link", filter.link.as_deref())
            .ilike("sd.lyrics", filter.text.as_deref())
            .ilike("g.name", filter.group_name.as_deref())
            .build(page);

        let records = bind_all_as(sqlx::query_as::<_, SongRecord>(&sql), &args)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Get a song by id; zero rows is a distinct not-found error
    pub async fn get(&self, id: i32) -> Result<SongRecord, Error> {
        sqlx::query_as::<_, SongRecord>("SELECT id, name, group_id FROM songs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::NotFound { what: "song", id })
    }

    /// Apply only the supplied fields; success without touching the
    /// database when none were supplied
    pub async fn update(&self, id: i32, input: &UpdateSong) -> Result<(), Error> {
        let builder = UpdateBuilder::new(Self::TABLE, "id")
            .set_opt("name", input.name.clone().map(SqlArg::Text))
            .set_opt("group_id", input.group_id.map(SqlArg::Int));

        let Some((sql, args)) = builder.build(id) else {
            tracing::debug!(id, "Song update with no fields, skipping");
            return Ok(());
        };

        bind_all(sqlx::query(&sql), &args)
            .execute(&self.pool)
            .await?;

        tracing::info!(id, "Song updated");
        Ok(())
    }

    /// Delete by id; the details row goes with it via the FK cascade.
    /// Deleting an absent id is still success.
    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM songs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(id, rows = result.rows_affected(), "Song delete");
        Ok(())
    }
}
