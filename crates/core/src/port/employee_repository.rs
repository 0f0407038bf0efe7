// Employee Repository Port (Interface)

use crate::domain::EmployeeRow;
use crate::error::Result;
use async_trait::async_trait;

/// Which employees the join query covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeFilter {
    All,
    Code(String),
}

/// Read side: executes the employee join and decodes each row
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Fetch joined rows ordered by employee id, then by project link order
    async fn fetch_rows(&self, filter: &EmployeeFilter) -> Result<Vec<EmployeeRow>>;
}
