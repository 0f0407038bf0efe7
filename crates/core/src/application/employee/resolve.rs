// Lookup Resolver (get-or-create for reference tables)

use crate::domain::{ReferenceId, ReferenceKind};
use crate::error::{AppError, Result};
use crate::port::EmployeeTransaction;
use tracing::debug;

/// Return the id of the `kind` row named `name`, inserting it if absent.
///
/// Runs inside the caller's transaction, so a row created here is rolled back
/// with the enclosing write. Reference names are unique in storage: when the
/// insert loses a race to a concurrent writer, the name is re-read once and the
/// winner's id is returned.
pub async fn resolve_or_create(
    tx: &mut dyn EmployeeTransaction,
    kind: ReferenceKind,
    name: &str,
) -> Result<ReferenceId> {
    if let Some(id) = tx.find_reference(kind, name).await? {
        debug!(kind = %kind, name = %name, id = id, "Reference resolved");
        return Ok(id);
    }

    match tx.insert_reference(kind, name).await {
        Ok(id) => {
            debug!(kind = %kind, name = %name, id = id, "Reference created");
            Ok(id)
        }
        Err(AppError::Conflict(msg)) => {
            debug!(kind = %kind, name = %name, "Reference insert conflicted, re-reading");
            tx.find_reference(kind, name)
                .await?
                .ok_or(AppError::Conflict(msg))
        }
        Err(e) => Err(e),
    }
}
