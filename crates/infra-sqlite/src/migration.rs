// Migration Runner

use crate::error::map_sqlx_error;
use roster_core::error::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Ordered schema migrations. Each script records its own version row.
const MIGRATIONS: &[(i64, &str, &str)] = &[
    (
        1,
        "Initial schema",
        include_str!("../migrations/001_initial_schema.sql"),
    ),
    (
        2,
        "Lookup indexes",
        include_str!("../migrations/002_add_indexes.sql"),
    ),
];

/// Bring the schema up to the latest version. Safe to call on every start.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let current = current_version(pool).await?;
    info!(current_version = current, "Running database migrations...");

    for (version, name, sql) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
        info!(version = version, name = name, "Applying migration");
        apply_migration(pool, sql).await?;
    }

    info!("All migrations applied successfully");
    Ok(())
}

/// 0 on a fresh database
async fn current_version(pool: &SqlitePool) -> Result<i64> {
    let tracked: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
    )
    .fetch_one(pool)
    .await
    .map_err(map_sqlx_error)?;

    if tracked == 0 {
        return Ok(0);
    }

    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
        .fetch_one(pool)
        .await
        .map_err(map_sqlx_error)?;

    Ok(version.unwrap_or(0))
}

/// Run one script's statements in a single transaction
async fn apply_migration(pool: &SqlitePool, sql: &str) -> Result<()> {
    let mut tx = pool.begin().await.map_err(map_sqlx_error)?;

    for statement in statements(sql) {
        sqlx::query(&statement)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
    }

    tx.commit().await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Split a script on `;`, dropping `--` comment lines and empty statements
fn statements(sql: &str) -> impl Iterator<Item = String> + '_ {
    sql.split(';')
        .map(|chunk| {
            chunk
                .lines()
                .filter(|line| !line.trim_start().starts_with("--"))
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string()
        })
        .filter(|statement| !statement.is_empty())
}
