// Roster Infrastructure - SQLite Adapter
// Implements: EmployeeRepository, TransactionalEmployeeRepository

mod connection;
mod employee_repository;
mod error;
mod migration;
mod query;
mod transaction;

pub use connection::create_pool;
pub use employee_repository::SqliteEmployeeRepository;
pub use migration::run_migrations;
pub use transaction::SqliteEmployeeTransaction;

// Note: sqlx::Error conversion is handled by the map_sqlx_error helper
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
