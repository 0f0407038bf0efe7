// Employee Service - Core use cases for employee records

pub mod add;
pub mod delete;
pub mod query;
pub mod resolve;
pub mod update;

#[cfg(test)]
pub(crate) mod fake;

pub use resolve::resolve_or_create;

use crate::domain::{Employee, EmployeeDraft, EmployeeId, ReferenceKind};
use crate::error::Result;
use crate::port::{EmployeeRepository, EmployeeTransaction, TransactionalEmployeeRepository};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// Employee Service: the contract consumed by the transport layer
pub struct EmployeeService {
    reader: Arc<dyn EmployeeRepository>,
    writer: Arc<dyn TransactionalEmployeeRepository>,
}

impl EmployeeService {
    pub fn new(
        reader: Arc<dyn EmployeeRepository>,
        writer: Arc<dyn TransactionalEmployeeRepository>,
    ) -> Self {
        Self { reader, writer }
    }

    /// Fetch every employee aggregate
    pub async fn list(&self) -> Result<Vec<Employee>> {
        query::find_all(self.reader.as_ref()).await
    }

    /// Fetch one aggregate by business code (`None` when absent)
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Employee>> {
        query::find_by_code(self.reader.as_ref(), code).await
    }

    /// Add a new employee with details and project links
    pub async fn add(&self, draft: &EmployeeDraft) -> Result<EmployeeId> {
        add::execute(self.writer.as_ref(), draft).await
    }

    /// Update an employee by internal id, replacing all project links.
    /// Returns `false` if no employee has the id.
    pub async fn update(&self, id: EmployeeId, draft: &EmployeeDraft) -> Result<bool> {
        update::execute(self.writer.as_ref(), id, draft).await
    }

    /// Update the employee holding `code`. Returns `false` if no employee has it.
    pub async fn update_by_code(&self, code: &str, draft: &EmployeeDraft) -> Result<bool> {
        match self.find_by_code(code).await? {
            Some(existing) => self.update(existing.id, draft).await,
            None => Ok(false),
        }
    }

    /// Delete an employee by internal id together with details and project links.
    /// Returns `false` if no employee has the id.
    pub async fn delete(&self, id: EmployeeId) -> Result<bool> {
        delete::execute(self.writer.as_ref(), id).await
    }

    /// Delete the employee holding `code`. Returns `false` if no employee has it.
    pub async fn delete_by_code(&self, code: &str) -> Result<bool> {
        match self.find_by_code(code).await? {
            Some(existing) => self.delete(existing.id).await,
            None => Ok(false),
        }
    }
}

/// Commit on success; otherwise roll back and return the original error
pub(crate) async fn finish<T>(
    tx: Box<dyn EmployeeTransaction>,
    outcome: Result<T>,
) -> Result<T> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, cause = %err, "Rollback failed");
            }
            Err(err)
        }
    }
}

/// Like `finish`, but a `false` outcome (target row missing) rolls back and
/// is returned as-is
pub(crate) async fn finish_found(
    tx: Box<dyn EmployeeTransaction>,
    outcome: Result<bool>,
) -> Result<bool> {
    match outcome {
        Ok(false) => {
            tx.rollback().await?;
            Ok(false)
        }
        outcome => finish(tx, outcome).await,
    }
}

/// Resolve each project name and insert one join-table row per distinct name.
///
/// Repeated names are linked once, at their first position.
pub(crate) async fn link_projects(
    tx: &mut dyn EmployeeTransaction,
    employee_id: EmployeeId,
    projects: &[String],
) -> Result<usize> {
    let mut linked = HashSet::new();
    for name in projects {
        if !linked.insert(name.as_str()) {
            continue;
        }
        let project_id = resolve_or_create(tx, ReferenceKind::Project, name).await?;
        tx.insert_employee_project(employee_id, project_id).await?;
    }
    Ok(linked.len())
}
