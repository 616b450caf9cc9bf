use crate::config::{Driver, PoolConfig};
use crate::error::SqlxErrorExt;
use crate::tx::Tx;
use awe_data::{DataError, Dialect};
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;
use sqlx::Executor as _;
use std::sync::LazyLock;
use tokio::sync::OnceCell;

/// A bounded pool of store connections plus the SQL dialect they speak.
///
/// Cloning is cheap; clones share the same connections.
#[derive(Debug, Clone)]
pub struct DbPool {
    pool: AnyPool,
    dialect: Dialect,
}

impl DbPool {
    /// Validate `config` and open the pool with `min_size` live connections.
    pub async fn connect(config: &PoolConfig) -> Result<Self, DataError> {
        config.validate()?;
        let url = config.connect_url()?;
        install_default_drivers();

        tracing::info!(
            driver = ?config.driver,
            host = %config.host,
            port = config.port,
            min_size = config.min_size,
            max_size = config.max_size,
            autocommit = config.autocommit,
            "create database connection pool"
        );

        let mut options = AnyPoolOptions::new()
            .min_connections(config.min_size)
            .max_connections(config.max_size);
        if !config.autocommit && config.driver == Driver::MySql {
            options = options.after_connect(|conn, _meta| {
                Box::pin(async move {
                    conn.execute("SET autocommit=0").await?;
                    Ok(())
                })
            });
        }

        let pool = options
            .connect(&url)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(Self::from_pool(pool, config.driver.dialect()))
    }

    /// Wrap an already-open pool.
    pub fn from_pool(pool: AnyPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Number of open connections, idle or in use.
    pub fn size(&self) -> u32 {
        self.pool.size()
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Begin a transaction on a pooled connection.
    pub async fn begin(&self) -> Result<Tx, DataError> {
        let tx = self.pool.begin().await.map_err(SqlxErrorExt::into_data_error)?;
        Ok(Tx(tx))
    }

    /// Close every connection; later operations fail.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database connection pool closed");
    }
}

static GLOBAL: LazyLock<OnceCell<DbPool>> = LazyLock::new(OnceCell::new);

/// Create the process-wide pool.
///
/// Only the first successful call connects; later calls return the existing
/// pool and ignore `config`. A failed call leaves the slot empty.
pub async fn init(config: &PoolConfig) -> Result<&'static DbPool, DataError> {
    GLOBAL.get_or_try_init(|| DbPool::connect(config)).await
}

/// The process-wide pool, if [`init`] has run.
pub fn global() -> Result<&'static DbPool, DataError> {
    GLOBAL.get().ok_or(DataError::PoolNotInitialized)
}

/// Close the process-wide pool, if any.
pub async fn shutdown() {
    if let Some(pool) = GLOBAL.get() {
        pool.close().await;
    }
}
