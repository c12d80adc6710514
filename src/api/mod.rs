//! API route definitions
//!
//! REST endpoints for the music library, plus health probes. Resource
//! routers live in their own modules and are nested under /api.

pub mod groups;
pub mod health;
pub mod songs;

use axum::Router;
use serde::{Deserialize, Serialize};

use crate::db::query::Page;
use crate::AppState;

/// Response body carrying a freshly generated id
#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: i32,
}

/// Response body for mutations with nothing else to report
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// page/limit query parameters; anything missing or non-positive falls
/// back to the defaults instead of erroring
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn resolve(&self) -> Page {
        Page::clamped(self.page, self.limit)
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api", groups::router().merge(songs::router()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_resolves_defaults() {
        let q = PageQuery::default();
        assert_eq!(q.resolve(), Page { page: 1, limit: 10 });

        let q = PageQuery {
            page: Some(0),
            limit: Some(-5),
        };
        assert_eq!(q.resolve(), Page { page: 1, limit: 10 });
    }
}
