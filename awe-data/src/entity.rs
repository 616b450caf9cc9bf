use crate::error::DataError;
use crate::record::Record;
use crate::schema::EntitySchema;
use crate::value::Value;

/// A record type mapped to one table.
///
/// Usually declared with [`entity!`](crate::entity), which derives the schema
/// once and wraps a [`Record`]. Persistence operations come from the
/// blanket [`Model`](crate::Model) implementation.
///
/// # Example
///
/// ```ignore
/// impl Entity for Tag {
///     fn schema() -> &'static EntitySchema { &TAG_SCHEMA }
///     fn from_record(record: Record) -> Self { Tag(record) }
///     fn record(&self) -> &Record { &self.0 }
///     fn record_mut(&mut self) -> &mut Record { &mut self.0 }
/// }
/// ```
pub trait Entity: Send + Sync + Sized + 'static {
    fn schema() -> &'static EntitySchema;
    fn from_record(record: Record) -> Self;
    fn record(&self) -> &Record;
    fn record_mut(&mut self) -> &mut Record;

    fn table_name() -> &'static str {
        Self::schema().table()
    }

    fn id_column() -> &'static str {
        Self::schema().primary_key()
    }

    /// Field lookup; an unset field is [`DataError::NoSuchAttribute`].
    fn get(&self, key: &str) -> Result<&Value, DataError> {
        self.record().attr(key)
    }

    fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.record_mut().set(key, value);
    }

    /// Current value, `Null` when unset.
    fn value(&self, key: &str) -> Value {
        self.record().get(key).cloned().unwrap_or(Value::Null)
    }

    /// Current value, falling back to the field's default.
    ///
    /// A resolved default is cached on the record, so a generator runs at
    /// most once per instance and field.
    fn value_or_default(&mut self, key: &str) -> Value {
        let current = self.value(key);
        if !current.is_null() {
            return current;
        }
        let Some(default) = Self::schema().field(key).and_then(|f| f.default_value()) else {
            return current;
        };
        let value = default.resolve();
        tracing::debug!(field = key, value = %value, "using default value");
        self.record_mut().set(key, value.clone());
        value
    }

    /// The primary key value, `Null` when unset.
    fn id(&self) -> Value {
        self.value(Self::schema().primary_key())
    }
}

/// Declare an entity type: a [`Record`] newtype plus its schema.
///
/// The schema is derived on first use and then shared. A declaration
/// without exactly one primary key aborts with a panic naming the entity;
/// call `Type::schema()` during startup to surface such mistakes early.
/// The `table` and `dialect` header lines are both optional but must come in
/// that order. The table defaults to the type name, and the dialect (quoting
/// and limit syntax) defaults to MySQL.
///
/// ```ignore
/// awe_data::entity! {
///     /// A registered account.
///     pub struct User {
///         table = "users";
///         id: FieldDescriptor::string().primary_key().default_with(next_id),
///         name: FieldDescriptor::string().ddl("varchar(50)"),
///     }
/// }
/// ```
#[macro_export]
macro_rules! entity {
    (
        @impl
        [$(#[$meta:meta])*] $vis:vis $name:ident
        table = [$($table:literal)?]
        dialect = [$($dialect:expr)?]
        fields = [$( $field:ident : $desc:expr ),+]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name($crate::Record);

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl $crate::Entity for $name {
            fn schema() -> &'static $crate::EntitySchema {
                static SCHEMA: ::std::sync::OnceLock<$crate::EntitySchema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    let builder = $crate::EntitySchema::builder(stringify!($name));
                    $( let builder = builder.table($table); )?
                    $( let builder = builder.dialect($dialect); )?
                    builder
                        $( .field(stringify!($field), $desc) )+
                        .build()
                        .unwrap_or_else(|err| {
                            panic!("invalid entity `{}`: {}", stringify!($name), err)
                        })
                })
            }

            fn from_record(record: $crate::Record) -> Self {
                Self(record)
            }

            fn record(&self) -> &$crate::Record {
                &self.0
            }

            fn record_mut(&mut self) -> &mut $crate::Record {
                &mut self.0
            }
        }

        impl ::std::convert::From<$crate::Record> for $name {
            fn from(record: $crate::Record) -> Self {
                Self(record)
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(&self.0, serializer)
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            table = $table:literal;
            dialect = $dialect:expr;
            $( $field:ident : $desc:expr ),+ $(,)?
        }
    ) => {
        $crate::entity! {
            @impl [$(#[$meta])*] $vis $name
            table = [$table]
            dialect = [$dialect]
            fields = [$( $field : $desc ),+]
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            table = $table:literal;
            $( $field:ident : $desc:expr ),+ $(,)?
        }
    ) => {
        $crate::entity! {
            @impl [$(#[$meta])*] $vis $name
            table = [$table]
            dialect = []
            fields = [$( $field : $desc ),+]
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            dialect = $dialect:expr;
            $( $field:ident : $desc:expr ),+ $(,)?
        }
    ) => {
        $crate::entity! {
            @impl [$(#[$meta])*] $vis $name
            table = []
            dialect = [$dialect]
            fields = [$( $field : $desc ),+]
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $field:ident : $desc:expr ),+ $(,)?
        }
    ) => {
        $crate::entity! {
            @impl [$(#[$meta])*] $vis $name
            table = []
            dialect = []
            fields = [$( $field : $desc ),+]
        }
    };
}
