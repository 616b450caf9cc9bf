use crate::model::WriteOp;

/// Errors raised while deriving an entity schema.
///
/// These are programming errors in an entity declaration, not runtime
/// conditions; the `entity!` macro aborts on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    MissingPrimaryKey { entity: String },
    DuplicatePrimaryKey { entity: String, field: String },
    DuplicateField { entity: String, field: String },
    InvalidIdentifier { entity: String, ident: String },
}

impl std::fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefinitionError::MissingPrimaryKey { entity } => {
                write!(f, "Primary key not found for entity {entity}")
            }
            DefinitionError::DuplicatePrimaryKey { entity, field } => {
                write!(f, "Duplicate primary key for field: {field} (entity {entity})")
            }
            DefinitionError::DuplicateField { entity, field } => {
                write!(f, "Field declared twice: {field} (entity {entity})")
            }
            DefinitionError::InvalidIdentifier { entity, ident } => {
                write!(f, "Invalid identifier '{ident}' in entity {entity}")
            }
        }
    }
}

impl std::error::Error for DefinitionError {}

/// Errors that can occur in the data layer.
#[derive(Debug)]
pub enum DataError {
    /// A failure reported by the store, kept as the driver's own error.
    Database(Box<dyn std::error::Error + Send + Sync>),
    Definition(DefinitionError),
    Configuration(String),
    InvalidArgument(String),
    /// Name-based access to a field that is not set on the record.
    NoSuchAttribute(String),
    AffectedRows {
        op: WriteOp,
        expected: u64,
        actual: u64,
    },
    PoolNotInitialized,
}

impl DataError {
    /// Construct a `Database` variant from any error type.
    ///
    /// Used by backend crates (e.g. `awe-data-sqlx`) to wrap driver-specific
    /// errors without translating them.
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        DataError::Database(Box::new(err))
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Database(err) => write!(f, "Database error: {err}"),
            DataError::Definition(err) => write!(f, "Definition error: {err}"),
            DataError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            DataError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            DataError::NoSuchAttribute(key) => write!(f, "Record has no attribute '{key}'"),
            DataError::AffectedRows {
                op,
                expected,
                actual,
            } => write!(f, "failed to {op} record: expected {expected} affected row(s), got {actual}"),
            DataError::PoolNotInitialized => write!(f, "Connection pool has not been initialized"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Database(err) => Some(err.as_ref()),
            DataError::Definition(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DefinitionError> for DataError {
    fn from(err: DefinitionError) -> Self {
        DataError::Definition(err)
    }
}
