use super::ConfigError;

/// Resolves `${...}` references found in string config values.
pub trait SecretResolver: Send + Sync {
    fn resolve(&self, reference: &str) -> Result<String, ConfigError>;
}

/// Default resolver: environment variables and files.
///
/// - `${VAR_NAME}` and `${env:VAR_NAME}` read an environment variable
/// - `${file:/path/to/secret}` reads a file, trimmed
pub struct DefaultSecretResolver;

impl SecretResolver for DefaultSecretResolver {
    fn resolve(&self, reference: &str) -> Result<String, ConfigError> {
        let reference = reference.trim();
        if let Some(path) = reference.strip_prefix("file:") {
            let path = path.trim();
            std::fs::read_to_string(path)
                .map(|s| s.trim().to_string())
                .map_err(|e| ConfigError::Load(format!("Secret file '{path}': {e}")))
        } else {
            let var = reference.strip_prefix("env:").unwrap_or(reference).trim();
            std::env::var(var).map_err(|_| ConfigError::NotFound(format!("env:{var}")))
        }
    }
}

/// Replace every `${...}` placeholder in `value`.
pub fn resolve_placeholders(
    value: &str,
    resolver: &dyn SecretResolver,
) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let end = rest[start..]
            .find('}')
            .ok_or_else(|| ConfigError::Load(format!("Unclosed placeholder in: {value}")))?;
        result.push_str(&rest[..start]);
        result.push_str(&resolver.resolve(&rest[start + 2..start + end])?);
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_resolution() {
        unsafe { std::env::set_var("TEST_AWE_DB_PASSWORD", "s3cret") };
        let resolver = DefaultSecretResolver;
        assert_eq!(
            resolve_placeholders("${TEST_AWE_DB_PASSWORD}", &resolver).unwrap(),
            "s3cret"
        );
        assert_eq!(
            resolve_placeholders("pw=${env:TEST_AWE_DB_PASSWORD};", &resolver).unwrap(),
            "pw=s3cret;"
        );
        unsafe { std::env::remove_var("TEST_AWE_DB_PASSWORD") };
    }

    #[test]
    fn test_file_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let secret_file = dir.path().join("db_password");
        std::fs::write(&secret_file, "from-file\n").unwrap();

        let reference = format!("${{file:{}}}", secret_file.display());
        let resolved = resolve_placeholders(&reference, &DefaultSecretResolver).unwrap();
        assert_eq!(resolved, "from-file");
    }

    #[test]
    fn test_unclosed_and_unknown() {
        let resolver = DefaultSecretResolver;
        assert!(matches!(
            resolve_placeholders("${UNCLOSED", &resolver),
            Err(ConfigError::Load(_))
        ));
        assert!(matches!(
            resolve_placeholders("${AWE_SURELY_NOT_SET_12345}", &resolver),
            Err(ConfigError::NotFound(_))
        ));
        assert_eq!(resolve_placeholders("plain", &resolver).unwrap(), "plain");
    }
}
