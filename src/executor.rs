//! The three statement primitives and the CRUD verbs layered on them.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::SqliteResult;
use crate::row::Row;
use crate::statement;
use crate::value::{Params, Value};

/// Something that can run a single statement.
///
/// Implementors supply [`execute`](Self::execute), [`fetch_all`](Self::fetch_all)
/// and [`fetch_one`](Self::fetch_one); every CRUD verb is provided on top of
/// them by formatting the statement text and delegating.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Run a statement that produces no rows.
    async fn execute(&self, sql: &str, params: Params) -> SqliteResult<()>;

    /// Run a query and collect every row. No match yields an empty vec.
    async fn fetch_all(&self, sql: &str, params: Params) -> SqliteResult<Vec<Row>>;

    /// Run a query and keep only the first row, if any.
    async fn fetch_one(&self, sql: &str, params: Params) -> SqliteResult<Option<Row>>;

    async fn fetch_all_as<T>(&self, sql: &str, params: Params) -> SqliteResult<Vec<T>>
    where
        T: DeserializeOwned + Send,
        Self: Sized,
    {
        let rows = self.fetch_all(sql, params).await?;
        rows.iter().map(Row::deserialize).collect()
    }

    async fn fetch_one_as<T>(&self, sql: &str, params: Params) -> SqliteResult<Option<T>>
    where
        T: DeserializeOwned + Send,
        Self: Sized,
    {
        let row = self.fetch_one(sql, params).await?;
        row.as_ref().map(Row::deserialize).transpose()
    }

    /// `CREATE TABLE IF NOT EXISTS`; a no-op when the table is already there.
    #[instrument(level = "debug", skip(self, columns))]
    async fn create_table(&self, table: &str, columns: &str) -> SqliteResult<()> {
        self.execute(&statement::create_table(table, columns), Params::new())
            .await
    }

    /// Insert one row, binding each value to its own placeholder.
    #[instrument(level = "debug", skip(self, columns, values))]
    async fn insert(&self, table: &str, columns: &str, values: Vec<Value>) -> SqliteResult<()> {
        let sql = statement::insert(table, columns, values.len());
        self.execute(&sql, Params::from(values)).await
    }

    /// A condition that always holds (`1 = 1`) updates the whole table.
    #[instrument(level = "debug", skip(self, assignments, condition, params))]
    async fn update(
        &self,
        table: &str,
        assignments: &str,
        condition: &str,
        params: Params,
    ) -> SqliteResult<()> {
        self.execute(&statement::update(table, assignments, condition), params)
            .await
    }

    #[instrument(level = "debug", skip(self, condition, params))]
    async fn delete(&self, table: &str, condition: &str, params: Params) -> SqliteResult<()> {
        self.execute(&statement::delete(table, condition), params)
            .await
    }

    #[instrument(level = "debug", skip(self))]
    async fn select_all(&self, table: &str) -> SqliteResult<Vec<Row>> {
        self.fetch_all(&statement::select_all(table), Params::new())
            .await
    }

    #[instrument(level = "debug", skip(self, condition, params))]
    async fn select_where(
        &self,
        table: &str,
        condition: &str,
        params: Params,
    ) -> SqliteResult<Vec<Row>> {
        self.fetch_all(&statement::select_where(table, condition), params)
            .await
    }

    #[instrument(level = "debug", skip(self, condition, params))]
    async fn select_one_where(
        &self,
        table: &str,
        condition: &str,
        params: Params,
    ) -> SqliteResult<Option<Row>> {
        self.fetch_one(&statement::select_where(table, condition), params)
            .await
    }

    #[instrument(level = "debug", skip(self, order_by))]
    async fn select_all_ordered(&self, table: &str, order_by: &str) -> SqliteResult<Vec<Row>> {
        self.fetch_all(&statement::select_all_ordered(table, order_by), Params::new())
            .await
    }
}
