use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use deadpool::managed::{Hook, Pool};
use derive_more::{Deref, DerefMut};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::scoped_futures::ScopedBoxFuture;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::custom_hooks;
use crate::{
    ConnectionPool, PgConfig, PgError, PgResult, PooledConnection, TRACING_TARGET_CONNECTION,
};

/// Acquisitions slower than this are logged as a sign of pool exhaustion.
const SLOW_ACQUIRE: Duration = Duration::from_millis(100);

/// Pooled Postgres client shared by every repository.
///
/// Clones share one pool.
#[derive(Clone)]
pub struct PgClient {
    pool: ConnectionPool,
    config: Arc<PgConfig>,
}

impl PgClient {
    /// Builds the pool lazily; no connection is opened until first use.
    ///
    /// # Errors
    ///
    /// Returns [`PgError::Unexpected`] if deadpool rejects the pool settings.
    #[tracing::instrument(
        skip(config),
        target = TRACING_TARGET_CONNECTION,
        fields(database_url = %config.database_url_masked())
    )]
    pub fn new(config: PgConfig) -> PgResult<Self> {
        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup = Box::new(custom_hooks::setup_callback);
        let manager =
            AsyncDieselConnectionManager::new_with_config(&config.postgres_url, manager_config);

        let pool = Pool::builder(manager)
            .max_size(config.postgres_max_connections as usize)
            .wait_timeout(config.connection_timeout())
            .create_timeout(config.connection_timeout())
            .recycle_timeout(config.idle_timeout())
            .runtime(deadpool::Runtime::Tokio1)
            .post_create(Hook::sync_fn(custom_hooks::post_create))
            .post_recycle(Hook::sync_fn(custom_hooks::post_recycle))
            .build()
            .map_err(|e| PgError::Unexpected(format!("invalid pool settings: {e}").into()))?;

        tracing::info!(
            target: TRACING_TARGET_CONNECTION,
            max_connections = config.postgres_max_connections,
            "Wishlist database pool created"
        );

        Ok(Self {
            pool,
            config: Arc::new(config),
        })
    }

    /// Checks out a connection, waiting up to the configured timeout.
    pub async fn get_connection(&self) -> PgResult<PgConn> {
        let start = Instant::now();
        let conn = self.pool.get().await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_CONNECTION,
                error = %e,
                waited = ?start.elapsed(),
                "Connection checkout failed"
            );
            PgError::from(e)
        })?;

        let waited = start.elapsed();
        if waited > SLOW_ACQUIRE {
            tracing::warn!(
                target: TRACING_TARGET_CONNECTION,
                waited = ?waited,
                waiting = self.pool.status().waiting,
                "Slow connection checkout"
            );
        }

        Ok(PgConn { conn })
    }

    /// Round-trips `SELECT 1` on a pooled connection.
    pub async fn ping(&self) -> PgResult<()> {
        let mut conn = self.get_connection().await?;
        diesel::sql_query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map_err(PgError::from)?;
        Ok(())
    }
}

impl fmt::Debug for PgClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.pool.status();
        f.debug_struct("PgClient")
            .field("database_url", &self.config.database_url_masked())
            .field("pool_size", &status.size)
            .field("pool_max_size", &status.max_size)
            .finish()
    }
}

/// A checked-out connection; dropping it returns it to the pool.
#[derive(Deref, DerefMut)]
pub struct PgConn {
    conn: PooledConnection,
}

impl PgConn {
    pub fn into_inner(self) -> PooledConnection {
        self.conn
    }

    /// Runs `f` in a transaction, committing on `Ok` and rolling back on `Err`.
    pub async fn transaction<'a, T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: for<'r> FnOnce(&'r mut PooledConnection) -> ScopedBoxFuture<'a, 'r, Result<T, E>>
            + Send
            + 'a,
        T: Send + 'a,
        E: From<diesel::result::Error> + Send + 'a,
    {
        self.conn.transaction(f).await
    }
}
