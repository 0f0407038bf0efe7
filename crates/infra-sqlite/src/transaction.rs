// SQLite Transaction Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use roster_core::domain::{EmployeeDraft, EmployeeId, ReferenceId, ReferenceKind};
use roster_core::error::Result;
use roster_core::port::{EmployeeTransaction, Transaction};
use sqlx::{Sqlite, Transaction as SqlxTransaction};

/// One write transaction holding its own pooled connection.
///
/// Dropping it without `commit` rolls the work back.
pub struct SqliteEmployeeTransaction<'a> {
    tx: SqlxTransaction<'a, Sqlite>,
}

impl<'a> SqliteEmployeeTransaction<'a> {
    pub fn new(tx: SqlxTransaction<'a, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transaction for SqliteEmployeeTransaction<'_> {
    async fn commit(mut self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl EmployeeTransaction for SqliteEmployeeTransaction<'_> {
    async fn find_reference(
        &mut self,
        kind: ReferenceKind,
        name: &str,
    ) -> Result<Option<ReferenceId>> {
        let sql = format!("SELECT id FROM {} WHERE name = ?", kind.table());
        let id: Option<i64> = sqlx::query_scalar(&sql)
            .bind(name)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(id)
    }

    async fn insert_reference(&mut self, kind: ReferenceKind, name: &str) -> Result<ReferenceId> {
        let sql = format!("INSERT INTO {} (name) VALUES (?) RETURNING id", kind.table());
        let id: i64 = sqlx::query_scalar(&sql)
            .bind(name)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(id)
    }

    async fn insert_employee(&mut self, draft: &EmployeeDraft) -> Result<EmployeeId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO employees (first_name, last_name, code, date_of_birth)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.code)
        .bind(draft.date_of_birth)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(id)
    }

    async fn update_employee(&mut self, id: EmployeeId, draft: &EmployeeDraft) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET first_name = ?, last_name = ?, date_of_birth = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(draft.date_of_birth)
        .bind(id)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_employee(&mut self, id: EmployeeId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn insert_details(
        &mut self,
        employee_id: EmployeeId,
        department_id: ReferenceId,
        designation_id: ReferenceId,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO employee_details (employee_id, department_id, designation_id)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(employee_id)
        .bind(department_id)
        .bind(designation_id)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn update_details(
        &mut self,
        employee_id: EmployeeId,
        department_id: ReferenceId,
        designation_id: ReferenceId,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE employee_details
            SET department_id = ?, designation_id = ?
            WHERE employee_id = ?
            "#,
        )
        .bind(department_id)
        .bind(designation_id)
        .bind(employee_id)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_details(&mut self, employee_id: EmployeeId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM employee_details WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn insert_employee_project(
        &mut self,
        employee_id: EmployeeId,
        project_id: ReferenceId,
    ) -> Result<()> {
        sqlx::query("INSERT INTO employee_projects (employee_id, project_id) VALUES (?, ?)")
            .bind(employee_id)
            .bind(project_id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn delete_employee_projects(&mut self, employee_id: EmployeeId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM employee_projects WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
