// Update Use Case

use super::{finish_found, link_projects, resolve_or_create};
use crate::domain::{EmployeeDraft, EmployeeId, ReferenceKind};
use crate::error::Result;
use crate::port::{EmployeeTransaction, TransactionalEmployeeRepository};
use tracing::{info, warn};

/// Update scalar columns and details, then replace every project link.
///
/// Links are deleted and re-inserted from `draft.projects`; no diff is computed.
/// The employee code is never changed. An unknown id rolls back and returns
/// `false`.
pub async fn execute(
    repo: &dyn TransactionalEmployeeRepository,
    id: EmployeeId,
    draft: &EmployeeDraft,
) -> Result<bool> {
    draft.validate()?;

    let mut tx = repo.begin_transaction().await?;
    let outcome = apply(&mut *tx, id, draft).await;
    let found = finish_found(tx, outcome).await?;

    if found {
        info!(
            employee_id = id,
            projects = draft.projects.len(),
            "Employee updated"
        );
    }
    Ok(found)
}

async fn apply(
    tx: &mut dyn EmployeeTransaction,
    id: EmployeeId,
    draft: &EmployeeDraft,
) -> Result<bool> {
    let department_id = resolve_or_create(tx, ReferenceKind::Department, &draft.department).await?;
    let designation_id =
        resolve_or_create(tx, ReferenceKind::Designation, &draft.designation).await?;

    if tx.update_employee(id, draft).await? == 0 {
        return Ok(false);
    }

    if tx.update_details(id, department_id, designation_id).await? == 0 {
        warn!(employee_id = id, "Employee has no details row, details not updated");
    }

    tx.delete_employee_projects(id).await?;
    link_projects(tx, id, &draft.projects).await?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::employee::{add, fake::FakeStore, query};

    #[tokio::test]
    async fn test_update_replaces_project_set() {
        let store = FakeStore::new();
        let id = add::execute(&*store, &EmployeeDraft::new_test("E001", &["A", "B"]))
            .await
            .unwrap();

        let found = execute(&*store, id, &EmployeeDraft::new_test("E001", &["B", "C"]))
            .await
            .unwrap();
        assert!(found);

        let employee = query::find_by_code(&*store, "E001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(employee.project_names(), vec!["B", "C"]);
        assert_eq!(store.link_count(), 2);
    }

    #[tokio::test]
    async fn test_update_with_no_projects_clears_links() {
        let store = FakeStore::new();
        let id = add::execute(&*store, &EmployeeDraft::new_test("E001", &["A"]))
            .await
            .unwrap();

        execute(&*store, id, &EmployeeDraft::new_test("E001", &[]))
            .await
            .unwrap();

        let employee = query::find_by_code(&*store, "E001")
            .await
            .unwrap()
            .unwrap();
        assert!(employee.projects.is_empty());
        assert!(store.has_reference(ReferenceKind::Project, "A"));
    }

    #[tokio::test]
    async fn test_update_keeps_code_and_changes_scalars() {
        let store = FakeStore::new();
        let id = add::execute(&*store, &EmployeeDraft::new_test("E001", &[]))
            .await
            .unwrap();

        let mut draft = EmployeeDraft::new_test("IGNORED", &[]);
        draft.first_name = "Grace".to_string();
        draft.department = "Research".to_string();
        execute(&*store, id, &draft).await.unwrap();

        let employee = query::find_by_code(&*store, "E001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(employee.first_name, "Grace");
        assert_eq!(employee.department_name(), Some("Research"));
    }

    #[tokio::test]
    async fn test_update_unknown_id_rolls_back() {
        let store = FakeStore::new();

        let found = execute(&*store, 99, &EmployeeDraft::new_test("E099", &["A"]))
            .await
            .unwrap();

        assert!(!found);
        assert_eq!(store.stats().rollbacks, 1);
        assert_eq!(store.stats().commits, 0);
        assert!(!store.has_reference(ReferenceKind::Department, "Development"));
    }

    #[tokio::test]
    async fn test_update_links_repeated_name_once() {
        let store = FakeStore::new();
        let id = add::execute(&*store, &EmployeeDraft::new_test("E001", &["A"]))
            .await
            .unwrap();

        execute(&*store, id, &EmployeeDraft::new_test("E001", &["C", "B", "C"]))
            .await
            .unwrap();

        let employee = query::find_by_code(&*store, "E001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(employee.project_names(), vec!["C", "B"]);
        assert_eq!(store.link_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_relink_keeps_previous_links() {
        let store = FakeStore::new();
        let id = add::execute(&*store, &EmployeeDraft::new_test("E001", &["A", "B"]))
            .await
            .unwrap();

        // First link of this transaction fails
        store.fail_link_at(1);
        let result = execute(&*store, id, &EmployeeDraft::new_test("E001", &["C"])).await;

        assert!(result.is_err());
        let employee = query::find_by_code(&*store, "E001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(employee.project_names(), vec!["A", "B"]);
    }
}
