//! Terminal operations: finalize the statement, run it against the pool,
//! map the result. Connections are pooled; the `PoolConnection` guard
//! returns them on every exit path, failures included.

use sqlx::any::{AnyQueryResult, AnyRow};
use sqlx::Row as _;
use tracing::debug;

use crate::error::{Error, Result};
use crate::row::Row;
use crate::{Database, Value};

use super::builder::BuiltQuery;
use super::QueryBuilder;

impl Database {
    /// Run a statement verbatim and materialize every row. The builder is
    /// bypassed entirely; text and params go to the driver as given.
    pub async fn raw_fetch(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>> {
        trace_statement(sql);
        let mut conn = self.pool().acquire().await?;
        let mut query = sqlx::query(sql);
        binds!(params, query);
        let rows = query.fetch_all(&mut *conn).await?;
        Ok(rows.iter().map(Row::from_any).collect())
    }

    /// Run a statement verbatim and return the affected-row count.
    pub async fn raw_execute(&self, sql: &str, params: Vec<Value>) -> Result<u64> {
        trace_statement(sql);
        let mut conn = self.pool().acquire().await?;
        let mut query = sqlx::query(sql);
        binds!(params, query);
        Ok(query.execute(&mut *conn).await?.rows_affected())
    }
}

impl QueryBuilder<'_> {
    /// Execute the assembled SELECT and return every row.
    pub async fn find_all(self) -> Result<Vec<Row>> {
        let built = self.build_select()?;
        let rows = self.fetch_rows(built).await?;
        Ok(rows.iter().map(Row::from_any).collect())
    }

    /// Alias for [`find_all`](Self::find_all).
    pub async fn find(self) -> Result<Vec<Row>> {
        self.find_all().await
    }

    /// Execute the assembled SELECT and return the first row, if any.
    pub async fn find_one(self) -> Result<Option<Row>> {
        let built = self.build_select()?;
        let sql = self.db.driver().rewrite_placeholders(&built.sql);
        trace_statement(&sql);
        let mut conn = self.db.pool().acquire().await?;
        let mut query = sqlx::query(&sql);
        binds!(built.args, query);
        let row = query.fetch_optional(&mut *conn).await?;
        Ok(row.as_ref().map(Row::from_any))
    }

    /// Alias for [`find_one`](Self::find_one).
    pub async fn find_first(self) -> Result<Option<Row>> {
        self.find_one().await
    }

    /// Build and execute the INSERT. Returns the generated row id when the
    /// backend reports one (SQLite, MySQL); PostgreSQL reports none.
    pub async fn insert(self, cols: Vec<(String, Value)>) -> Result<Option<i64>> {
        let built = self.build_insert(&cols)?;
        let result = self.execute_built(built).await?;
        Ok(result.last_insert_id())
    }

    /// Build and execute the UPDATE. Returns the affected-row count.
    pub async fn update(self, cols: Vec<(String, Value)>) -> Result<u64> {
        let built = self.build_update(&cols)?;
        Ok(self.execute_built(built).await?.rows_affected())
    }

    /// Single-column convenience over [`update`](Self::update).
    pub async fn set_field(self, column: &str, value: impl Into<Value>) -> Result<u64> {
        self.update(vec![(column.to_string(), value.into())]).await
    }

    /// Build and execute the DELETE. Returns the affected-row count.
    pub async fn delete(self) -> Result<u64> {
        let built = self.build_delete()?;
        Ok(self.execute_built(built).await?.rows_affected())
    }

    /// Count matching rows by overriding the projection with a count
    /// aggregate. Failures surface to the caller.
    pub async fn count(mut self) -> Result<i64> {
        self.fields = "COUNT(*) AS count".to_string();
        let built = self.build_select()?;
        let sql = self.db.driver().rewrite_placeholders(&built.sql);
        trace_statement(&sql);
        let mut conn = self.db.pool().acquire().await?;
        let mut query = sqlx::query(&sql);
        binds!(built.args, query);
        let row = query.fetch_one(&mut *conn).await?;
        Ok(row.try_get::<i64, _>(0)?)
    }

    /// Legacy counting: any failure reads as zero. Prefer
    /// [`count`](Self::count), which reports what went wrong.
    pub async fn count_or_zero(self) -> i64 {
        self.count().await.unwrap_or(0)
    }

    async fn execute_built(&self, built: BuiltQuery) -> Result<AnyQueryResult, Error> {
        let sql = self.db.driver().rewrite_placeholders(&built.sql);
        trace_statement(&sql);
        let mut conn = self.db.pool().acquire().await?;
        let mut query = sqlx::query(&sql);
        binds!(built.args, query);
        Ok(query.execute(&mut *conn).await?)
    }

    async fn fetch_rows(&self, built: BuiltQuery) -> Result<Vec<AnyRow>, Error> {
        let sql = self.db.driver().rewrite_placeholders(&built.sql);
        trace_statement(&sql);
        let mut conn = self.db.pool().acquire().await?;
        let mut query = sqlx::query(&sql);
        binds!(built.args, query);
        Ok(query.fetch_all(&mut *conn).await?)
    }
}

fn trace_statement(sql: &str) {
    #[cfg(debug_assertions)]
    {
        let formatted = sqlformat::format(
            sql,
            &sqlformat::QueryParams::None,
            &sqlformat::FormatOptions::default(),
        );
        debug!("executing:\n{formatted}");
    }
    #[cfg(not(debug_assertions))]
    debug!("executing: {sql}");
}
