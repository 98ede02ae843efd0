//! Connection pool, parameterized query execution, schema bootstrap (§4.1).

mod schema;

use futures_util::future::BoxFuture;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool};

use crate::config::Config;
use crate::error::Result;
use crate::tx_scope;

/// Owns the bounded connection pool and exposes parameterized access to it.
///
/// All queries issued through [`Store::with_conn`] are parameterized; the
/// engine never interpolates user-controlled values into SQL text.
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Connect using the pool bounds in [`crate::config::PoolConfig`]
    /// (default max 20, idle 30s, connect timeout 2s).
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool.max_connections)
            .idle_timeout(config.pool.idle_timeout)
            .acquire_timeout(config.pool.connect_timeout)
            .connect(&config.db.connection_url())
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an already-constructed pool (used by tests against a scratch
    /// database).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Idempotently install the `nodes` schema and the chat-core tables.
    pub async fn bootstrap(&self) -> Result<()> {
        tracing::info!("bootstrapping schema");
        sqlx::raw_sql(schema::SCHEMA_SQL).execute(&self.pool).await?;
        tracing::info!("schema bootstrap complete");
        Ok(())
    }

    /// Run `f` against the connection that is authoritative for the
    /// current logical request: the active [`tx_scope`] transaction if
    /// one exists, otherwise a fresh pooled connection (auto-commit).
    ///
    /// This is the mechanism by which every VFS primitive becomes
    /// transaction-aware without threading a connection parameter through
    /// every call (§4.2).
    pub async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, sqlx::Result<T>>,
    {
        match tx_scope::current() {
            Some(state) => {
                let mut guard = state.tx.lock().await;
                Ok(f(&mut guard).await?)
            }
            None => {
                let mut conn = self.pool.acquire().await?;
                Ok(f(&mut conn).await?)
            }
        }
    }
}
