//! Song endpoints, including the per-song details and paginated lyrics

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::{IdResponse, PageQuery, StatusResponse};
use crate::db::query::Page;
use crate::db::{SongDetailsSummary, SongFilter, SongRecord, UpdateSong, UpdateSongDetails};
use crate::error::Error;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSongRequest {
    pub name: String,
    pub group_id: i32,
}

/// Filter plus pagination for GET /songs/filter
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongFilterQuery {
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub link: Option<String>,
    pub text: Option<String>,
    pub group_name: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

async fn create_song(
    State(state): State<AppState>,
    Json(body): Json<CreateSongRequest>,
) -> Result<Json<IdResponse>, Error> {
    let id = state.db.songs().create(&body.name, body.group_id).await?;
    Ok(Json(IdResponse { id }))
}

async fn list_songs(State(state): State<AppState>) -> Result<Json<Vec<SongRecord>>, Error> {
    let records = state.db.songs().list_all().await?;
    Ok(Json(records))
}

async fn list_songs_filtered(
    State(state): State<AppState>,
    Query(params): Query<SongFilterQuery>,
) -> Result<Json<Vec<SongRecord>>, Error> {
    let filter = SongFilter {
        name: params.name,
        release_date: params.release_date,
        link: params.link,
        text: params.text,
        group_name: params.group_name,
    };
    let page = Page::clamped(params.page, params.limit);
    let records = state.db.songs().list_filtered(&filter, &page).await?;
    Ok(Json(records))
}

async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SongRecord>, Error> {
    let record = state.db.songs().get(id).await?;
    Ok(Json(record))
}

async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateSong>,
) -> Result<Json<StatusResponse>, Error> {
    state.db.songs().update(id, &body).await?;
    Ok(Json(StatusResponse::ok()))
}

async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StatusResponse>, Error> {
    state.db.songs().delete(id).await?;
    Ok(Json(StatusResponse::ok()))
}

async fn get_song_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SongDetailsSummary>, Error> {
    let summary = state.db.song_details().get_by_song(id).await?;
    Ok(Json(summary))
}

async fn update_song_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateSongDetails>,
) -> Result<Json<StatusResponse>, Error> {
    state.db.song_details().update_by_song(id, &body).await?;
    Ok(Json(StatusResponse::ok()))
}

async fn get_song_lyrics(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<PageQuery>,
) -> Result<Json<Vec<String>>, Error> {
    let verses = state
        .db
        .song_details()
        .lyrics_page(id, &params.resolve())
        .await?;
    Ok(Json(verses))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/songs", get(list_songs).post(create_song))
        .route("/songs/filter", get(list_songs_filtered))
        .route(
            "/songs/{id}",
            get(get_song).put(update_song).delete(delete_song),
        )
        .route(
            "/songs/{id}/details",
            get(get_song_details).put(update_song_details),
        )
        .route("/songs/{id}/lyrics", get(get_song_lyrics))
}
