// Delete Use Case

use super::finish_found;
use crate::domain::EmployeeId;
use crate::error::Result;
use crate::port::{EmployeeTransaction, TransactionalEmployeeRepository};
use tracing::{debug, info};

/// Delete project links, then details, then the employee row.
///
/// Reference rows (departments, designations, projects) are left in place.
/// An unknown id rolls back and returns `false`.
pub async fn execute(repo: &dyn TransactionalEmployeeRepository, id: EmployeeId) -> Result<bool> {
    let mut tx = repo.begin_transaction().await?;
    let outcome = apply(&mut *tx, id).await;
    let found = finish_found(tx, outcome).await?;

    if found {
        info!(employee_id = id, "Employee deleted");
    }
    Ok(found)
}

async fn apply(tx: &mut dyn EmployeeTransaction, id: EmployeeId) -> Result<bool> {
    // Children before parent
    let links = tx.delete_employee_projects(id).await?;
    tx.delete_details(id).await?;

    if tx.delete_employee(id).await? == 0 {
        return Ok(false);
    }

    debug!(employee_id = id, links_removed = links, "Employee rows removed");
    Ok(true)
}
