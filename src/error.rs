//! Error taxonomy for the data access layer and its HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors surfaced by repositories.
///
/// A lookup that matches zero rows is `NotFound`, never `Store` - callers
/// can rely on the distinction. Unique and foreign key violations are
/// reported as `Constraint`; everything else the driver raises is `Store`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: i32 },

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("database error: {0}")]
    Store(#[source] sqlx::Error),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
                return Error::Constraint(db_err.message().to_string());
            }
        }
        Error::Store(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Constraint(_) => StatusCode::CONFLICT,
            Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn row_not_found_from_sqlx_is_a_store_error() {
        // Repositories translate zero-row lookups themselves via
        // fetch_optional; a raw RowNotFound from the driver is unexpected
        // and stays a store error.
        let err = Error::from(sqlx::Error::RowNotFound);
        assert_matches!(err, Error::Store(_));
    }

    #[test]
    fn not_found_message_names_the_entity() {
        let err = Error::NotFound {
            what: "group",
            id: 7,
        };
        assert_eq!(err.to_string(), "group 7 not found");
    }
}
