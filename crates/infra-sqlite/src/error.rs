// sqlx::Error classification

use roster_core::error::AppError;
use tracing::debug;

/// Convert sqlx::Error to AppError, keeping the database message verbatim.
///
/// Uniqueness failures become `Conflict` so the lookup resolver can detect a
/// lost get-or-create race; everything else is `Database`.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code();
            let message = db_err.message().to_string();
            debug!(code = ?code, message = %message, "SQLite statement failed");

            // SQLite extended result codes: https://www.sqlite.org/rescode.html
            match code.as_deref() {
                // UNIQUE / PRIMARY KEY constraint failed
                Some("2067") | Some("1555") => AppError::Conflict(message),
                _ => AppError::Database(message),
            }
        }
        // Connection, pool, protocol, decode errors
        _ => AppError::Database(err.to_string()),
    }
}
