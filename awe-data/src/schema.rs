use crate::error::DefinitionError;
use crate::field::{FieldDescriptor, FieldKind};
use crate::query::{is_valid_identifier, Dialect};
use crate::record::Row;
use crate::value::Value;
use std::collections::HashMap;

/// Mapping and statement metadata derived once per entity type.
///
/// Holds the table name, the primary key, the non-key fields in declaration
/// order, and the four canonical statements:
///
/// | Statement | Shape |
/// |-----------|-------|
/// | select | ``select `pk`, `f1`, ... from `table` `` |
/// | insert | ``insert into `table` (`f1`, ..., `pk`) values (?, ..., ?)`` |
/// | update | ``update `table` set `f1`=?, ... where `pk`=?`` |
/// | delete | ``delete from `table` where `pk`=?`` |
#[derive(Debug, Clone)]
pub struct EntitySchema {
    entity: String,
    table: String,
    primary_key: String,
    fields: Vec<String>,
    mappings: HashMap<String, FieldDescriptor>,
    dialect: Dialect,
    select: String,
    insert: String,
    update: String,
    delete: String,
}

impl EntitySchema {
    pub fn builder(entity: &str) -> SchemaBuilder {
        SchemaBuilder {
            entity: entity.to_string(),
            table: None,
            dialect: Dialect::default(),
            fields: Vec::new(),
        }
    }

    pub fn entity_name(&self) -> &str {
        &self.entity
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Non-key field names, in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.mappings.get(name)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn select_sql(&self) -> &str {
        &self.select
    }

    pub fn insert_sql(&self) -> &str {
        &self.insert
    }

    pub fn update_sql(&self) -> &str {
        &self.update
    }

    pub fn delete_sql(&self) -> &str {
        &self.delete
    }

    pub fn quote(&self, ident: &str) -> String {
        self.dialect.quote(ident)
    }

    /// `create table` statement built from the descriptors' column types.
    pub fn create_table(&self) -> String {
        self.create_table_for(self.dialect)
    }

    /// `create table` statement for a store speaking `dialect`.
    ///
    /// Lets a MySQL-declared entity be created on the pool it actually runs
    /// against, e.g. `schema.create_table_for(pool.dialect())`.
    pub fn create_table_for(&self, dialect: Dialect) -> String {
        let column = |name: &str| {
            let field = &self.mappings[name];
            format!("{} {}", dialect.quote(name), dialect.column_type(field.column_type()))
        };
        let mut columns = Vec::with_capacity(self.fields.len() + 2);
        columns.push(format!("{} not null", column(self.primary_key.as_str())));
        columns.extend(self.fields.iter().map(|name| column(name.as_str())));
        columns.push(format!("primary key ({})", dialect.quote(&self.primary_key)));
        format!("create table {} ({})", dialect.quote(&self.table), columns.join(", "))
    }

    /// Align a fetched row with the declared field kinds.
    ///
    /// Stores without a native boolean hand `0`/`1` back for boolean columns.
    pub fn normalize(&self, mut row: Row) -> Row {
        for (name, value) in row.iter_mut() {
            let Some(field) = self.mappings.get(name) else {
                continue;
            };
            if field.kind() == FieldKind::Boolean {
                if let Value::Int(i) = *value {
                    *value = Value::Bool(i != 0);
                }
            }
        }
        row
    }
}

/// Collects field declarations and derives an [`EntitySchema`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    entity: String,
    table: Option<String>,
    dialect: Dialect,
    fields: Vec<(String, FieldDescriptor)>,
}

impl SchemaBuilder {
    /// Table name override (defaults to the entity name).
    pub fn table(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn field(mut self, attribute: &str, descriptor: FieldDescriptor) -> Self {
        self.fields.push((attribute.to_string(), descriptor));
        self
    }

    pub fn build(self) -> Result<EntitySchema, DefinitionError> {
        let entity = self.entity;
        let table = self.table.unwrap_or_else(|| entity.clone());
        tracing::info!(entity = %entity, table = %table, "found model");
        if !is_valid_identifier(&table) {
            return Err(DefinitionError::InvalidIdentifier {
                entity,
                ident: table,
            });
        }

        let mut mappings = HashMap::with_capacity(self.fields.len());
        let mut fields = Vec::with_capacity(self.fields.len());
        let mut primary_key: Option<String> = None;

        for (attribute, descriptor) in self.fields {
            let descriptor = descriptor.resolve_name(&attribute);
            let name = descriptor.column_name().unwrap_or(&attribute).to_string();
            tracing::debug!(entity = %entity, field = %name, mapping = %descriptor, "found mapping");
            if !is_valid_identifier(&name) {
                return Err(DefinitionError::InvalidIdentifier { entity, ident: name });
            }
            if mappings.contains_key(&name) {
                return Err(DefinitionError::DuplicateField { entity, field: name });
            }
            if descriptor.is_primary_key() {
                if primary_key.is_some() {
                    return Err(DefinitionError::DuplicatePrimaryKey { entity, field: name });
                }
                primary_key = Some(name.clone());
            } else {
                fields.push(name.clone());
            }
            mappings.insert(name, descriptor);
        }

        let Some(primary_key) = primary_key else {
            return Err(DefinitionError::MissingPrimaryKey { entity });
        };

        let dialect = self.dialect;
        let q = |ident: &str| dialect.quote(ident);
        let quoted_table = q(table.as_str());
        let quoted_pk = q(primary_key.as_str());
        let quoted_fields: Vec<String> = fields.iter().map(|f| q(f.as_str())).collect();

        let select_columns: Vec<&str> = std::iter::once(quoted_pk.as_str())
            .chain(quoted_fields.iter().map(String::as_str))
            .collect();
        let select = format!("select {} from {quoted_table}", select_columns.join(", "));

        let insert_columns: Vec<&str> = quoted_fields
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(quoted_pk.as_str()))
            .collect();
        let insert = format!(
            "insert into {quoted_table} ({}) values ({})",
            insert_columns.join(", "),
            placeholders(insert_columns.len())
        );

        let assignments = if quoted_fields.is_empty() {
            format!("{quoted_pk}={quoted_pk}")
        } else {
            quoted_fields
                .iter()
                .map(|f| format!("{f}=?"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let update = format!("update {quoted_table} set {assignments} where {quoted_pk}=?");
        let delete = format!("delete from {quoted_table} where {quoted_pk}=?");

        Ok(EntitySchema {
            entity,
            table,
            primary_key,
            fields,
            mappings,
            dialect,
            select,
            insert,
            update,
            delete,
        })
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_builder() -> SchemaBuilder {
        EntitySchema::builder("User")
            .table("users")
            .field("id", FieldDescriptor::string().primary_key().ddl("varchar(50)"))
            .field("email", FieldDescriptor::string().ddl("varchar(50)"))
            .field("admin", FieldDescriptor::boolean())
            .field("created_at", FieldDescriptor::float())
    }

    #[test]
    fn test_templates() {
        let schema = user_builder().build().unwrap();
        assert_eq!(schema.table(), "users");
        assert_eq!(schema.primary_key(), "id");
        assert_eq!(schema.fields(), &["email", "admin", "created_at"]);
        assert_eq!(
            schema.select_sql(),
            "select `id`, `email`, `admin`, `created_at` from `users`"
        );
        assert_eq!(
            schema.insert_sql(),
            "insert into `users` (`email`, `admin`, `created_at`, `id`) values (?, ?, ?, ?)"
        );
        assert_eq!(
            schema.update_sql(),
            "update `users` set `email`=?, `admin`=?, `created_at`=? where `id`=?"
        );
        assert_eq!(schema.delete_sql(), "delete from `users` where `id`=?");
    }

    #[test]
    fn test_every_field_referenced_once() {
        let schema = user_builder().build().unwrap();
        let all = ["`id`", "`email`", "`admin`", "`created_at`"];
        for sql in [schema.select_sql(), schema.insert_sql(), schema.update_sql()] {
            for col in all {
                assert_eq!(sql.matches(col).count(), 1, "{col} in {sql}");
            }
        }
        assert_eq!(schema.delete_sql().matches("`id`").count(), 1);
        assert_eq!(schema.insert_sql().matches('?').count(), all.len());
        assert_eq!(schema.update_sql().matches('?').count(), all.len());
    }

    #[test]
    fn test_table_defaults_to_entity_name() {
        let schema = EntitySchema::builder("Tag")
            .field("id", FieldDescriptor::integer().primary_key())
            .build()
            .unwrap();
        assert_eq!(schema.table(), "Tag");
        assert_eq!(schema.select_sql(), "select `id` from `Tag`");
        assert_eq!(schema.update_sql(), "update `Tag` set `id`=`id` where `id`=?");
    }

    #[test]
    fn test_missing_primary_key() {
        let err = EntitySchema::builder("Note")
            .field("body", FieldDescriptor::text())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::MissingPrimaryKey {
                entity: "Note".into()
            }
        );
    }

    #[test]
    fn test_duplicate_primary_key() {
        let err = user_builder()
            .field("uuid", FieldDescriptor::string().primary_key())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::DuplicatePrimaryKey {
                entity: "User".into(),
                field: "uuid".into()
            }
        );
        assert!(err.to_string().contains("uuid"));
    }

    #[test]
    fn test_column_name_override() {
        let schema = EntitySchema::builder("Blog")
            .field("id", FieldDescriptor::string().primary_key())
            .field("author", FieldDescriptor::string().name("user_id"))
            .build()
            .unwrap();
        assert_eq!(schema.fields(), &["user_id"]);
        assert!(schema.field("user_id").is_some());
        assert_eq!(schema.update_sql(), "update `Blog` set `user_id`=? where `id`=?");
    }

    #[test]
    fn test_duplicate_field_and_bad_identifier() {
        let dup = EntitySchema::builder("X")
            .field("id", FieldDescriptor::integer().primary_key())
            .field("a", FieldDescriptor::string())
            .field("b", FieldDescriptor::string().name("a"))
            .build()
            .unwrap_err();
        assert!(matches!(dup, DefinitionError::DuplicateField { .. }));

        let bad = EntitySchema::builder("X")
            .table("x; drop table y")
            .field("id", FieldDescriptor::integer().primary_key())
            .build()
            .unwrap_err();
        assert!(matches!(bad, DefinitionError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_postgres_quoting() {
        let schema = user_builder().dialect(Dialect::Postgres).build().unwrap();
        assert_eq!(schema.delete_sql(), "delete from \"users\" where \"id\"=?");
    }

    #[test]
    fn test_create_table() {
        let schema = user_builder().build().unwrap();
        assert_eq!(
            schema.create_table(),
            "create table `users` (`id` varchar(50) not null, `email` varchar(50), \
             `admin` boolean, `created_at` real, primary key (`id`))"
        );
    }

    #[test]
    fn test_create_table_for_sqlite_stores_booleans_as_integers() {
        let schema = user_builder().build().unwrap();
        assert_eq!(
            schema.create_table_for(Dialect::Sqlite),
            "create table `users` (`id` varchar(50) not null, `email` varchar(50), \
             `admin` integer, `created_at` real, primary key (`id`))"
        );
        assert!(schema
            .create_table_for(Dialect::Postgres)
            .contains("\"admin\" boolean"));
    }

    #[test]
    fn test_normalize_turns_flags_into_booleans() {
        let schema = user_builder().build().unwrap();
        let mut row = Row::new();
        row.insert("admin".into(), Value::Int(1));
        row.insert("created_at".into(), Value::Int(1));
        row.insert("extra".into(), Value::Int(0));
        let row = schema.normalize(row);
        assert_eq!(row["admin"], Value::Bool(true));
        assert_eq!(row["created_at"], Value::Int(1));
        assert_eq!(row["extra"], Value::Int(0));
    }
}
