// Port Layer - Interfaces for external dependencies

pub mod employee_repository;
pub mod transaction;

// Re-exports
pub use employee_repository::{EmployeeFilter, EmployeeRepository};
pub use transaction::{EmployeeTransaction, Transaction, TransactionalEmployeeRepository};
