// Application Layer - Use Cases and Business Logic

pub mod employee;

// Re-exports
pub use employee::EmployeeService;
