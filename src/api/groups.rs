//! Group endpoints

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::{IdResponse, StatusResponse};
use crate::db::query::Page;
use crate::db::{GroupFilter, GroupRecord, UpdateGroup};
use crate::error::Error;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

/// Filter plus pagination for GET /groups/filter
#[derive(Debug, Default, Deserialize)]
pub struct GroupFilterQuery {
    pub name: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

async fn create_group(
    State(state): State<AppState>,
    Json(body): Json<CreateGroupRequest>,
) -> Result<Json<IdResponse>, Error> {
    let id = state.db.groups().create(&body.name).await?;
    Ok(Json(IdResponse { id }))
}

async fn list_groups(State(state): State<AppState>) -> Result<Json<Vec<GroupRecord>>, Error> {
    let records = state.db.groups().list_all().await?;
    Ok(Json(records))
}

async fn list_groups_filtered(
    State(state): State<AppState>,
    Query(params): Query<GroupFilterQuery>,
) -> Result<Json<Vec<GroupRecord>>, Error> {
    let filter = GroupFilter { name: params.name };
    let page = Page::clamped(params.page, params.limit);
    let records = state.db.groups().list_filtered(&filter, &page).await?;
    Ok(Json(records))
}

async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GroupRecord>, Error> {
    let record = state.db.groups().get(id).await?;
    Ok(Json(record))
}

async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateGroup>,
) -> Result<Json<StatusResponse>, Error> {
    state.db.groups().update(id, &body).await?;
    Ok(Json(StatusResponse::ok()))
}

async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StatusResponse>, Error> {
    state.db.groups().delete(id).await?;
    Ok(Json(StatusResponse::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/groups", get(list_groups).post(create_group))
        .route("/groups/filter", get(list_groups_filtered))
        .route(
            "/groups/{id}",
            get(get_group).put(update_group).delete(delete_group),
        )
}
