//! # awe-data-sqlx: SQLx backend for the awe data layer
//!
//! Owns the process-wide connection pool and implements
//! [`awe_data::Executor`] on top of it, so every [`awe_data::Model`]
//! operation can run against a real store.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PoolConfig`] | Pool settings, read from the `database` config section |
//! | [`DbPool`] | Bounded `sqlx::AnyPool` plus the [`awe_data::Dialect`] it speaks |
//! | [`pool::init`] / [`pool::global`] / [`pool::shutdown`] | Process-wide pool lifecycle |
//! | [`Tx`] | Transaction on a pooled connection, rolled back on drop |
//! | [`SqlxErrorExt`] | Convert `sqlx::Error` into `DataError` (`.into_data_error()`) |
//!
//! # Feature flags
//!
//! | Feature    | Driver |
//! |------------|--------|
//! | `mysql`    | MySQL via `sqlx/mysql` (default) |
//! | `postgres` | PostgreSQL via `sqlx/postgres` |
//! | `sqlite`   | SQLite via `sqlx/sqlite` |
//!
//! # Quick start
//!
//! ```ignore
//! use awe_data_sqlx::{pool, PoolConfig};
//!
//! let config = PoolConfig::new("www-data", "www-data", "awesome");
//! let db = pool::init(&config).await?;
//! let users = User::find_all(db, FindAll::new().order_by("`created_at` desc")).await?;
//! pool::shutdown().await;
//! ```

pub mod config;
mod convert;
mod engine;
pub mod error;
pub mod pool;
pub mod tx;

pub use config::{Driver, PoolConfig};
pub use error::SqlxErrorExt;
pub use pool::DbPool;
pub use tx::Tx;

pub mod prelude {
    //! Re-exports of the pool types.
    pub use crate::{pool, DbPool, Driver, PoolConfig, SqlxErrorExt, Tx};
}
