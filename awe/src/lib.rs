//! awe: a minimal async ORM.
//!
//! This facade crate re-exports the awe sub-crates through a single
//! dependency with feature flags. Import everything you need with:
//!
//! ```ignore
//! use awe::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature     | Default | Crate                      |
//! |-------------|---------|----------------------------|
//! | `data-sqlx` | **yes** | `awe-data-sqlx`            |
//! | `models`    | **yes** | `awe-models`               |
//! | `mysql`     | **yes** | `awe-data-sqlx/mysql`      |
//! | `sqlite`    | no      | `awe-data-sqlx/sqlite`     |
//! | `postgres`  | no      | `awe-data-sqlx/postgres`   |
//! | `full`      | no      | All of the above           |
//!
//! # Startup
//!
//! ```ignore
//! let config = AweConfig::load("prod")?;
//! awe::init_tracing(LogFormat::Json);
//! let db = awe::connect(&config).await?;
//! let user = User::find(db, user_id).await?;
//! awe::awe_data_sqlx::pool::shutdown().await;
//! ```

pub use awe_core;
pub use awe_data;

// Re-export everything from awe-core at the top level for convenience.
pub use awe_core::*;

#[cfg(feature = "data-sqlx")]
pub use awe_data_sqlx;

#[cfg(feature = "models")]
pub use awe_models;

/// Create the process-wide pool from the `database` section of `config`.
///
/// Configuration errors are reported before any connection is attempted.
#[cfg(feature = "data-sqlx")]
pub async fn connect(
    config: &AweConfig,
) -> Result<&'static awe_data_sqlx::DbPool, awe_data::DataError> {
    let pool_config = awe_data_sqlx::PoolConfig::load(config)?;
    awe_data_sqlx::pool::init(&pool_config).await
}

/// Unified prelude: import everything with `use awe::prelude::*`.
pub mod prelude {
    pub use awe_core::prelude::*;
    pub use awe_data::prelude::*;

    #[cfg(feature = "data-sqlx")]
    pub use awe_data_sqlx::prelude::*;

    #[cfg(feature = "models")]
    pub use awe_models::{Blog, Comment, User};
}
