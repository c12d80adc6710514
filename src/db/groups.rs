//! Group database repository

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db::query::{bind_all, bind_all_as, Page, SelectBuilder, SqlArg, UpdateBuilder};
use crate::error::Error;

/// Group record from database
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct GroupRecord {
    pub id: i32,
    pub name: String,
}

/// Input for a partial group update; absent fields stay untouched
#[derive(Debug, Default, Deserialize)]
pub struct UpdateGroup {
    pub name: Option<String>,
}

/// Optional substring filters for listing groups
#[derive(Debug, Default, Deserialize)]
pub struct GroupFilter {
    pub name: Option<String>,
}

pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    const TABLE: &'static str = "groups";

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a group, returning the generated id
    pub async fn create(&self, name: &str) -> Result<i32, Error> {
        let (id,): (i32,) = sqlx::query_as("INSERT INTO groups (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(id, "Group created");
        Ok(id)
    }

    /// List all groups ordered by id
    pub async fn list_all(&self) -> Result<Vec<GroupRecord>, Error> {
        let records = sqlx::query_as::<_, GroupRecord>("SELECT id, name FROM groups ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// List one page of groups matching the filter
    pub async fn list_filtered(
        &self,
        filter: &GroupFilter,
        page: &Page,
    ) -> Result<Vec<GroupRecord>, Error> {
        let (sql, args) = SelectBuilder::new("SELECT id, name FROM groups", "id")
            .ilike("name", filter.name.as_deref())
            .build(page);

        let records = bind_all_as(sqlx::query_as::<_, GroupRecord>(&sql), &args)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Get a group by id; zero rows is a distinct not-found error
    pub async fn get(&self, id: i32) -> Result<GroupRecord, Error> {
        sqlx::query_as::<_, GroupRecord>("SELECT id, name FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::NotFound { what: "group", id })
    }

    /// Apply only the supplied fields; success without touching the
    /// database when none were supplied
    pub async fn update(&self, id: i32, input: &UpdateGroup) -> Result<(), Error> {
        let builder = UpdateBuilder::new(Self::TABLE, "id")
            .set_opt("name", input.name.clone().map(SqlArg::Text));

        let Some((sql, args)) = builder.build(id) else {
            tracing::debug!(id, "Group update with no fields, skipping");
            return Ok(());
        };

        bind_all(sqlx::query(&sql), &args)
            .execute(&self.pool)
            .await?;

        tracing::info!(id, "Group updated");
        Ok(())
    }

    /// Delete by id; deleting an absent id is still success
    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(id, rows = result.rows_affected(), "Group delete");
        Ok(())
    }
}
