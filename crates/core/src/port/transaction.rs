// Transaction port for atomic multi-table writes

use crate::domain::{EmployeeDraft, EmployeeId, ReferenceId, ReferenceKind};
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Transactional employee writes
#[async_trait]
pub trait TransactionalEmployeeRepository: Send + Sync {
    /// Begin a new transaction on a freshly acquired connection
    async fn begin_transaction(&self) -> Result<Box<dyn EmployeeTransaction>>;
}

/// Single-statement primitives, all scoped to one open transaction.
///
/// Counts returned are rows affected.
#[async_trait]
pub trait EmployeeTransaction: Transaction {
    /// Exact-name lookup in a reference table
    async fn find_reference(&mut self, kind: ReferenceKind, name: &str)
        -> Result<Option<ReferenceId>>;

    /// Insert a reference row. A duplicate name fails with `AppError::Conflict`.
    async fn insert_reference(&mut self, kind: ReferenceKind, name: &str) -> Result<ReferenceId>;

    /// Insert the employee scalar columns and return the generated id
    async fn insert_employee(&mut self, draft: &EmployeeDraft) -> Result<EmployeeId>;

    /// Update first/last name and date of birth (code is left untouched)
    async fn update_employee(&mut self, id: EmployeeId, draft: &EmployeeDraft) -> Result<u64>;

    async fn delete_employee(&mut self, id: EmployeeId) -> Result<u64>;

    async fn insert_details(
        &mut self,
        employee_id: EmployeeId,
        department_id: ReferenceId,
        designation_id: ReferenceId,
    ) -> Result<()>;

    async fn update_details(
        &mut self,
        employee_id: EmployeeId,
        department_id: ReferenceId,
        designation_id: ReferenceId,
    ) -> Result<u64>;

    async fn delete_details(&mut self, employee_id: EmployeeId) -> Result<u64>;

    /// Insert one join-table row
    async fn insert_employee_project(
        &mut self,
        employee_id: EmployeeId,
        project_id: ReferenceId,
    ) -> Result<()>;

    /// Remove every join-table row of the employee
    async fn delete_employee_projects(&mut self, employee_id: EmployeeId) -> Result<u64>;
}
