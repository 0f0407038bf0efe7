// Domain Layer - Pure business logic and entities

pub mod aggregate;
pub mod employee;
pub mod error;

// Re-exports
pub use aggregate::{flatten, EmployeeRow};
pub use employee::{
    Department, Designation, Employee, EmployeeDetails, EmployeeDraft, EmployeeId, Project,
    ReferenceId, ReferenceKind,
};
pub use error::DomainError;
