// Query Facade

use crate::domain::{flatten, Employee};
use crate::error::Result;
use crate::port::{EmployeeFilter, EmployeeRepository};

/// Every employee aggregate, in ascending id order
pub async fn find_all(repo: &dyn EmployeeRepository) -> Result<Vec<Employee>> {
    let rows = repo.fetch_rows(&EmployeeFilter::All).await?;
    Ok(flatten(rows))
}

/// The aggregate holding `code`, or `None`
pub async fn find_by_code(repo: &dyn EmployeeRepository, code: &str) -> Result<Option<Employee>> {
    let rows = repo
        .fetch_rows(&EmployeeFilter::Code(code.to_string()))
        .await?;
    Ok(flatten(rows).into_iter().next())
}
