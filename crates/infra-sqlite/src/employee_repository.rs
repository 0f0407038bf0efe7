// SQLite EmployeeRepository Implementation

use crate::error::map_sqlx_error;
use crate::query::{employees_sql, JoinedRow};
use crate::SqliteEmployeeTransaction;
use async_trait::async_trait;
use roster_core::domain::EmployeeRow;
use roster_core::error::Result;
use roster_core::port::{
    EmployeeFilter, EmployeeRepository, EmployeeTransaction, TransactionalEmployeeRepository,
};
use sqlx::SqlitePool;
use tracing::debug;

/// Write transactions take the RESERVED lock up front. Concurrent writers queue
/// on the busy timeout instead of failing with a stale WAL snapshot, so a
/// get-or-create that lost a race re-reads the committed row.
const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

pub struct SqliteEmployeeRepository {
    pool: SqlitePool,
}

impl SqliteEmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for SqliteEmployeeRepository {
    async fn fetch_rows(&self, filter: &EmployeeFilter) -> Result<Vec<EmployeeRow>> {
        let sql = employees_sql(filter);

        let mut query = sqlx::query_as::<_, JoinedRow>(&sql);
        if let EmployeeFilter::Code(code) = filter {
            query = query.bind(code);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(map_sqlx_error)?;
        debug!(filter = ?filter, rows = rows.len(), "Employee join fetched");

        Ok(rows.into_iter().map(JoinedRow::into_parts).collect())
    }
}

#[async_trait]
impl TransactionalEmployeeRepository for SqliteEmployeeRepository {
    async fn begin_transaction(&self) -> Result<Box<dyn EmployeeTransaction>> {
        let tx = self
            .pool
            .begin_with(BEGIN_WRITE)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteEmployeeTransaction::new(tx)))
    }
}
