//! Embedded schema migrations.

use std::time::{Duration, Instant};

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Outcome of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    /// Total duration of the migration run.
    pub duration: Duration,
    /// Versions applied during this run, in order.
    pub applied_versions: Vec<String>,
}

impl MigrationResult {
    /// Returns whether the run applied nothing.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.applied_versions.is_empty()
    }
}

/// Applies all pending embedded migrations.
///
/// Diesel's migration harness is synchronous, so the run happens on the
/// blocking thread pool through [`AsyncConnectionWrapper`].
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub async fn run_pending_migrations(pg: &PgClient) -> PgResult<MigrationResult> {
    let start = Instant::now();
    let conn = pg.get_connection().await?;
    let mut conn: AsyncConnectionWrapper<_> = conn.into_inner().into();

    let versions = spawn_blocking(move || {
        conn.run_pending_migrations(MIGRATIONS).map(|versions| {
            versions
                .into_iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
        })
    })
    .await
    .map_err(|err| {
        tracing::error!(target: TRACING_TARGET_MIGRATION, error = %err, "Migration task panicked");
        PgError::Migration(err.into())
    })?
    .map_err(|err| {
        tracing::error!(target: TRACING_TARGET_MIGRATION, error = %err, "Database migration failed");
        PgError::Migration(err)
    })?;

    let result = MigrationResult {
        duration: start.elapsed(),
        applied_versions: versions,
    };

    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        duration = ?result.duration,
        migrations_count = result.applied_versions.len(),
        "Database migrations applied"
    );

    Ok(result)
}

/// Extension trait adding migration support to [`PgClient`].
pub trait PgClientMigrationExt {
    /// Applies all pending migrations. Safe to call repeatedly.
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<MigrationResult>> + Send;
}

impl PgClientMigrationExt for PgClient {
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<MigrationResult>> + Send {
        run_pending_migrations(self)
    }
}
