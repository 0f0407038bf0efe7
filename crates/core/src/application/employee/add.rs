// Add Use Case

use super::{finish, link_projects, resolve_or_create};
use crate::domain::{EmployeeDraft, EmployeeId, ReferenceKind};
use crate::error::Result;
use crate::port::{EmployeeTransaction, TransactionalEmployeeRepository};
use tracing::info;

/// Insert an employee, its details row and one join row per project, atomically.
///
/// # Arguments
///
/// * `repo` - Transactional employee repository
/// * `draft` - Employee to insert; reference names are resolved or created
pub async fn execute(
    repo: &dyn TransactionalEmployeeRepository,
    draft: &EmployeeDraft,
) -> Result<EmployeeId> {
    draft.validate()?;

    let mut tx = repo.begin_transaction().await?;
    let outcome = apply(&mut *tx, draft).await;
    let employee_id = finish(tx, outcome).await?;

    info!(
        employee_id = employee_id,
        code = %draft.code,
        projects = draft.projects.len(),
        "Employee added"
    );
    Ok(employee_id)
}

async fn apply(tx: &mut dyn EmployeeTransaction, draft: &EmployeeDraft) -> Result<EmployeeId> {
    let department_id = resolve_or_create(tx, ReferenceKind::Department, &draft.department).await?;
    let designation_id =
        resolve_or_create(tx, ReferenceKind::Designation, &draft.designation).await?;

    let employee_id = tx.insert_employee(draft).await?;
    tx.insert_details(employee_id, department_id, designation_id)
        .await?;

    link_projects(tx, employee_id, &draft.projects).await?;

    Ok(employee_id)
}
