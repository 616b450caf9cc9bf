use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Zero-argument producer of a default value (ids, timestamps, ...).
pub type Generator = Arc<dyn Fn() -> Value + Send + Sync>;

/// Default-value policy of a field.
#[derive(Clone)]
pub enum FieldDefault {
    Value(Value),
    Generator(Generator),
}

impl FieldDefault {
    /// Produce the default, invoking the generator if there is one.
    pub fn resolve(&self) -> Value {
        match self {
            FieldDefault::Value(v) => v.clone(),
            FieldDefault::Generator(f) => f(),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Value(v) => f.debug_tuple("Value").field(v).finish(),
            FieldDefault::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
    Integer,
    Float,
    Text,
}

impl FieldKind {
    fn label(self) -> &'static str {
        match self {
            FieldKind::String => "StringField",
            FieldKind::Boolean => "BooleanField",
            FieldKind::Integer => "IntegerField",
            FieldKind::Float => "FloatField",
            FieldKind::Text => "TextField",
        }
    }
}

/// Describes one mapped column: name, storage type, key-ness and default.
///
/// Built with consuming methods and immutable once attached to a schema.
///
/// ```ignore
/// let id = FieldDescriptor::string()
///     .primary_key()
///     .ddl("varchar(50)")
///     .default_with(next_id);
/// let score = FieldDescriptor::float();
/// ```
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    kind: FieldKind,
    name: Option<String>,
    column_type: String,
    primary_key: bool,
    default: Option<FieldDefault>,
}

impl FieldDescriptor {
    fn new(kind: FieldKind, column_type: &str, default: Option<Value>) -> Self {
        Self {
            kind,
            name: None,
            column_type: column_type.to_string(),
            primary_key: false,
            default: default.map(FieldDefault::Value),
        }
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String, "varchar(100)", None)
    }

    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean, "boolean", Some(Value::Bool(false)))
    }

    pub fn integer() -> Self {
        Self::new(FieldKind::Integer, "bigint", Some(Value::Int(0)))
    }

    pub fn float() -> Self {
        Self::new(FieldKind::Float, "real", Some(Value::Float(0.0)))
    }

    pub fn text() -> Self {
        Self::new(FieldKind::Text, "text", None)
    }

    /// Override the column name (defaults to the declared attribute name).
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Override the storage type, e.g. `varchar(50)`.
    pub fn ddl(mut self, column_type: &str) -> Self {
        self.column_type = column_type.to_string();
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    pub fn default_with<F>(mut self, generator: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(FieldDefault::Generator(Arc::new(generator)));
        self
    }

    pub fn no_default(mut self) -> Self {
        self.default = None;
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn column_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn column_type(&self) -> &str {
        &self.column_type
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn default_value(&self) -> Option<&FieldDefault> {
        self.default.as_ref()
    }

    pub(crate) fn resolve_name(mut self, attribute: &str) -> Self {
        if self.name.is_none() {
            self.name = Some(attribute.to_string());
        }
        self
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}, {}:{}>",
            self.kind.label(),
            self.column_type,
            self.name.as_deref().unwrap_or("?")
        )
    }
}
