use super::{AweConfig, ConfigError};

/// A strongly-typed configuration section.
///
/// ```ignore
/// impl ConfigProperties for SmtpConfig {
///     fn prefix() -> &'static str { "smtp" }
///     fn from_config(config: &AweConfig) -> Result<Self, ConfigError> {
///         Ok(Self { host: config.get_or("smtp.host", "localhost".into())? })
///     }
/// }
/// let smtp: SmtpConfig = config.section()?;
/// ```
pub trait ConfigProperties: Sized {
    /// Key prefix of the section, e.g. `"database"`.
    fn prefix() -> &'static str;

    fn from_config(config: &AweConfig) -> Result<Self, ConfigError>;

    /// Full key for a property of this section.
    fn key(name: &str) -> String {
        format!("{}.{name}", Self::prefix())
    }
}
