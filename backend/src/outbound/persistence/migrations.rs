//! Embedded schema migrations, applied at startup.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::StorageError;

/// Migrations compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply pending migrations over a short-lived synchronous connection.
///
/// Runs once at boot, before the async pool is built, so a blocking
/// connection keeps the migration path independent of the runtime.
pub fn run_pending(database_url: &str) -> Result<(), StorageError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| StorageError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| StorageError::query(format!("migrations failed: {err}")))?;
    for migration in &applied {
        info!(%migration, "applied migration");
    }
    Ok(())
}
