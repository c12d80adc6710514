//! Song details database repository
//!
//! Details rows are created by `SongRepository::create` and only ever
//! updated afterwards; everything here is keyed by the owning song id.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db::lyrics;
use crate::db::query::{bind_all, Page, SqlArg, UpdateBuilder};
use crate::error::Error;

/// Details row without the lyric text, for list/detail responses
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SongDetailsSummary {
    pub id: i32,
    pub song_id: i32,
    pub release_date: String,
    pub link: String,
}

/// Input for a partial details update; absent fields stay untouched.
/// An explicit empty string is a real value and overwrites.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSongDetails {
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

pub struct SongDetailsRepository {
    pool: PgPool,
}

impl SongDetailsRepository {
    const TABLE: &'static str = "song_details";

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the details summary for a song
    pub async fn get_by_song(&self, song_id: i32) -> Result<SongDetailsSummary, Error> {
        sqlx::query_as::<_, SongDetailsSummary>(
            "SELECT id, song_id, release_date, link FROM song_details WHERE song_id = $1",
        )
        .bind(song_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::NotFound {
            what: "song details",
            id: song_id,
        })
    }

    /// Apply only the supplied fields to a song's details; success
    /// without touching the database when none were supplied
    pub async fn update_by_song(
        &self,
        song_id: i32,
        input: &UpdateSongDetails,
    ) -> Result<(), Error> {
        let builder = UpdateBuilder::new(Self::TABLE, "song_id")
            .set_opt("release_date", input.release_date.clone().map(SqlArg::Text))
            .set_opt("lyrics", input.text.clone().map(SqlArg::Text))
            .set_opt("link", input.link.clone().map(SqlArg::Text));

        let Some((sql, args)) = builder.build(song_id) else {
            tracing::debug!(song_id, "Details update with no fields, skipping");
            return Ok(());
        };

        bind_all(sqlx::query(&sql), &args)
            .execute(&self.pool)
            .await?;

        tracing::info!(song_id, "Song details updated");
        Ok(())
    }

    /// Fetch the stored lyric text and return one page of verses.
    /// Read-only and idempotent; a window past the end is just empty.
    pub async fn lyrics_page(&self, song_id: i32, page: &Page) -> Result<Vec<String>, Error> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT lyrics FROM song_details WHERE song_id = $1")
                .bind(song_id)
                .fetch_optional(&self.pool)
                .await?;

        let (text,) = row.ok_or(Error::NotFound {
            what: "song details",
            id: song_id,
        })?;

        Ok(lyrics::verse_window(lyrics::split_verses(&text), page))
    }
}
