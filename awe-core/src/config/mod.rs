mod loader;
pub mod secrets;
pub mod typed;
pub mod value;

use std::collections::HashMap;
use std::path::Path;

pub use secrets::{DefaultSecretResolver, SecretResolver};
pub use typed::ConfigProperties;
pub use value::{ConfigValue, FromConfigValue};

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested key was not found in the configuration.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Application configuration loaded from YAML files, `.env` files and
/// environment variables.
///
/// Resolution order (lowest to highest priority):
/// 1. `application.yaml`
/// 2. `application-{profile}.yaml`
/// 3. `.env` and `.env.{profile}` (loaded into the process environment,
///    never overwriting variables that are already set)
/// 4. Environment variables (`DATABASE_HOST` overrides `database.host`)
///
/// String values may reference secrets with `${VAR}`, `${env:VAR}` or
/// `${file:/path}`. The profile comes from `AWE_PROFILE`, else the argument.
#[derive(Debug, Clone)]
pub struct AweConfig {
    values: HashMap<String, ConfigValue>,
    profile: String,
}

impl AweConfig {
    /// Load configuration for the given profile from the working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_with_resolver(profile, &DefaultSecretResolver)
    }

    pub fn load_with_resolver(
        profile: &str,
        resolver: &dyn SecretResolver,
    ) -> Result<Self, ConfigError> {
        let active_profile = std::env::var("AWE_PROFILE").unwrap_or_else(|_| profile.to_string());

        let mut values = HashMap::new();
        loader::load_yaml_file(Path::new("application.yaml"), &mut values)?;
        let profile_path = format!("application-{active_profile}.yaml");
        loader::load_yaml_file(Path::new(&profile_path), &mut values)?;

        let _ = dotenvy::dotenv();
        let _ = dotenvy::from_filename(format!(".env.{active_profile}"));

        resolve_string_values(&mut values, resolver)?;

        for (env_key, env_val) in std::env::vars() {
            let config_key = env_key.to_lowercase().replace('_', ".");
            values.insert(config_key, ConfigValue::String(env_val));
        }

        tracing::debug!(profile = %active_profile, keys = values.len(), "configuration loaded");
        Ok(AweConfig {
            values,
            profile: active_profile,
        })
    }

    /// Create a config from a YAML string, without env overlay.
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_str(yaml, &mut values)?;
        resolve_string_values(&mut values, &DefaultSecretResolver)?;
        Ok(AweConfig {
            values,
            profile: profile.to_string(),
        })
    }

    pub fn empty() -> Self {
        AweConfig {
            values: HashMap::new(),
            profile: "test".to_string(),
        }
    }

    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Get a typed value for a dot-separated key.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    /// Get a typed value, falling back to `default` when the key is missing.
    ///
    /// A present value of the wrong type is still an error.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> Result<V, ConfigError> {
        match self.values.get(key) {
            Some(value) => V::from_config_value(value, key),
            None => Ok(default),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Build a typed section, e.g. the pool settings under `database`.
    pub fn section<C: ConfigProperties>(&self) -> Result<C, ConfigError> {
        C::from_config(self)
    }
}

fn resolve_string_values(
    values: &mut HashMap<String, ConfigValue>,
    resolver: &dyn SecretResolver,
) -> Result<(), ConfigError> {
    for value in values.values_mut() {
        if let ConfigValue::String(s) = value {
            if s.contains("${") {
                *s = secrets::resolve_placeholders(s, resolver)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
database:
  host: db.internal
  port: 3307
  autocommit: false
  pool:
    - primary
    - replica
"#;

    #[test]
    fn test_nested_keys_are_flattened() {
        let config = AweConfig::from_yaml_str(YAML, "test").unwrap();
        assert_eq!(config.get::<String>("database.host").unwrap(), "db.internal");
        assert_eq!(config.get::<u16>("database.port").unwrap(), 3307);
        assert!(!config.get::<bool>("database.autocommit").unwrap());
        assert_eq!(
            config.get::<Vec<String>>("database.pool").unwrap(),
            vec!["primary", "replica"]
        );
        assert_eq!(config.get::<String>("database.pool.1").unwrap(), "replica");
    }

    #[test]
    fn test_get_or_and_missing() {
        let config = AweConfig::from_yaml_str(YAML, "test").unwrap();
        assert_eq!(config.get_or("database.charset", "utf8".to_string()).unwrap(), "utf8");
        assert!(matches!(
            config.get::<String>("database.user"),
            Err(ConfigError::NotFound(_))
        ));
        assert!(matches!(
            config.get_or::<i64>("database.host", 0),
            Err(ConfigError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_set_overrides() {
        let mut config = AweConfig::empty();
        config.set("database.user", ConfigValue::String("www-data".into()));
        assert!(config.contains_key("database.user"));
        assert_eq!(config.profile(), "test");
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            AweConfig::from_yaml_str("database: [unclosed", "test"),
            Err(ConfigError::Load(_))
        ));
    }
}
