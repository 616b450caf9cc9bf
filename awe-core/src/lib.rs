//! # awe-core: configuration and logging for awe applications
//!
//! - [`config`]: [`AweConfig`] layered from YAML, `.env` files and the
//!   environment, with typed sections via [`ConfigProperties`].
//! - [`logging`]: [`init_tracing`] installs the `tracing` subscriber.

pub mod config;
pub mod logging;

pub use config::{AweConfig, ConfigError, ConfigProperties, ConfigValue, FromConfigValue};
pub use logging::{init_tracing, LogFormat};

pub mod prelude {
    //! Re-exports of the most commonly used core types.
    pub use crate::{init_tracing, AweConfig, ConfigProperties, LogFormat};
}
