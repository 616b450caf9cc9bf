use crate::error::DataError;
use crate::schema::EntitySchema;
use crate::value::Value;
use std::borrow::Cow;

/// Placeholder and identifier-quoting rules of the target store.
///
/// Statements are always written with `?` placeholders; the engine rewrites
/// them with [`Dialect::rewrite_placeholders`] right before sending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    /// MySQL-style `?` placeholders with backtick quoting.
    #[default]
    MySql,
    /// SQLite-style `?` placeholders. SQLite accepts backtick quoting too.
    Sqlite,
    /// Postgres-style `$1, $2, ...` placeholders.
    Postgres,
}

impl Dialect {
    fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            Dialect::MySql | Dialect::Sqlite => "?".to_string(),
        }
    }

    fn quote_char(self) -> char {
        match self {
            Dialect::MySql | Dialect::Sqlite => '`',
            Dialect::Postgres => '"',
        }
    }

    pub fn quote(self, ident: &str) -> String {
        let quote = self.quote_char();
        format!("{quote}{ident}{quote}")
    }

    /// Storage type to declare for a descriptor's column type.
    ///
    /// SQLite columns declared `boolean` come back as a type the `Any`
    /// driver cannot decode, so they are declared `integer` there.
    pub fn column_type(self, declared: &str) -> &str {
        match self {
            Dialect::Sqlite if declared.eq_ignore_ascii_case("boolean")
                || declared.eq_ignore_ascii_case("bool") =>
            {
                "integer"
            }
            _ => declared,
        }
    }

    /// Rewrite `?` into the native positional placeholder.
    ///
    /// Question marks inside single-quoted literals or quoted identifiers are
    /// left alone.
    pub fn rewrite_placeholders(self, sql: &str) -> Cow<'_, str> {
        if matches!(self, Dialect::MySql | Dialect::Sqlite) || !sql.contains('?') {
            return Cow::Borrowed(sql);
        }
        let mut out = String::with_capacity(sql.len() + 8);
        let mut index = 1usize;
        let mut quote: Option<char> = None;
        for c in sql.chars() {
            match quote {
                Some(q) if c == q => {
                    quote = None;
                    out.push(c);
                }
                Some(_) => out.push(c),
                None => match c {
                    '\'' | '"' | '`' => {
                        quote = Some(c);
                        out.push(c);
                    }
                    '?' => {
                        out.push_str(&self.placeholder(index));
                        index += 1;
                    }
                    _ => out.push(c),
                },
            }
        }
        Cow::Owned(out)
    }
}

/// Row limit of a `find_all` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Count(u64),
    Range { offset: u64, count: u64 },
}

impl From<u64> for Limit {
    fn from(count: u64) -> Self {
        Limit::Count(count)
    }
}

impl From<(u64, u64)> for Limit {
    fn from((offset, count): (u64, u64)) -> Self {
        Limit::Range { offset, count }
    }
}

impl TryFrom<&serde_json::Value> for Limit {
    type Error = DataError;

    /// Accepts a non-negative integer or a two-element `[offset, count]` array.
    fn try_from(raw: &serde_json::Value) -> Result<Self, Self::Error> {
        let invalid = || DataError::InvalidArgument(format!("Invalid limit value: {raw}"));
        match raw {
            serde_json::Value::Number(n) => n.as_u64().map(Limit::Count).ok_or_else(invalid),
            serde_json::Value::Array(items) if items.len() == 2 => {
                let offset = items[0].as_u64().ok_or_else(invalid)?;
                let count = items[1].as_u64().ok_or_else(invalid)?;
                Ok(Limit::Range { offset, count })
            }
            _ => Err(invalid()),
        }
    }
}

/// Parameters of a `find_all` query: filter, ordering and limit.
///
/// # Example
///
/// ```ignore
/// let recent = FindAll::new()
///     .filter("`user_id`=?", vec![user_id.into()])
///     .order_by("`created_at` desc")
///     .limit((0u64, 10u64));
/// let blogs = Blog::find_all(&pool, recent).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct FindAll {
    where_clause: Option<String>,
    args: Vec<Value>,
    order_by: Option<String>,
    limit: Option<Limit>,
}

impl FindAll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw `where` clause with `?` placeholders and its arguments.
    pub fn filter(mut self, clause: &str, args: Vec<Value>) -> Self {
        self.where_clause = Some(clause.to_string());
        self.args = args;
        self
    }

    pub fn order_by(mut self, expr: &str) -> Self {
        self.order_by = Some(expr.to_string());
        self
    }

    pub fn limit(mut self, limit: impl Into<Limit>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// Set the limit from untyped input (query strings, JSON bodies).
    pub fn limit_value(self, raw: &serde_json::Value) -> Result<Self, DataError> {
        let limit = Limit::try_from(raw)?;
        Ok(self.limit(limit))
    }

    /// Build the statement and its arguments against an entity schema.
    pub fn build(&self, schema: &EntitySchema) -> (String, Vec<Value>) {
        let mut sql = vec![schema.select_sql().to_string()];
        let mut args = self.args.clone();
        if let Some(clause) = self.where_clause.as_deref().filter(|c| !c.is_empty()) {
            sql.push("where".to_string());
            sql.push(clause.to_string());
        }
        if let Some(order) = self.order_by.as_deref().filter(|o| !o.is_empty()) {
            sql.push("order by".to_string());
            sql.push(order.to_string());
        }
        if let Some(limit) = self.limit {
            sql.push("limit".to_string());
            match (limit, schema.dialect()) {
                (Limit::Count(count), _) => {
                    sql.push("?".to_string());
                    args.push(to_arg(count));
                }
                (Limit::Range { offset, count }, Dialect::Postgres) => {
                    sql.push("? offset ?".to_string());
                    args.push(to_arg(count));
                    args.push(to_arg(offset));
                }
                (Limit::Range { offset, count }, _) => {
                    sql.push("?, ?".to_string());
                    args.push(to_arg(offset));
                    args.push(to_arg(count));
                }
            }
        }
        (sql.join(" "), args)
    }
}

fn to_arg(n: u64) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

/// A plain SQL identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_valid_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldDescriptor;
    use serde_json::json;

    fn schema(dialect: Dialect) -> EntitySchema {
        EntitySchema::builder("Score")
            .table("scores")
            .dialect(dialect)
            .field("id", FieldDescriptor::integer().primary_key())
            .field("name", FieldDescriptor::string())
            .build()
            .unwrap()
    }

    #[test]
    fn test_plain_select() {
        let (sql, args) = FindAll::new().build(&schema(Dialect::MySql));
        assert_eq!(sql, "select `id`, `name` from `scores`");
        assert!(args.is_empty());
    }

    #[test]
    fn test_full_query() {
        let (sql, args) = FindAll::new()
            .filter("`name`=?", vec!["alice".into()])
            .order_by("`id` desc")
            .limit((5u64, 10u64))
            .build(&schema(Dialect::MySql));
        assert_eq!(
            sql,
            "select `id`, `name` from `scores` where `name`=? order by `id` desc limit ?, ?"
        );
        assert_eq!(args, vec![Value::from("alice"), Value::Int(5), Value::Int(10)]);
    }

    #[test]
    fn test_single_limit() {
        let (sql, args) = FindAll::new().limit(3u64).build(&schema(Dialect::Sqlite));
        assert_eq!(sql, "select `id`, `name` from `scores` limit ?");
        assert_eq!(args, vec![Value::Int(3)]);
    }

    #[test]
    fn test_postgres_range_limit() {
        let (sql, args) = FindAll::new().limit((20u64, 10u64)).build(&schema(Dialect::Postgres));
        assert_eq!(sql, "select \"id\", \"name\" from \"scores\" limit ? offset ?");
        assert_eq!(args, vec![Value::Int(10), Value::Int(20)]);
    }

    #[test]
    fn test_limit_from_json() {
        assert_eq!(Limit::try_from(&json!(7)).unwrap(), Limit::Count(7));
        assert_eq!(
            Limit::try_from(&json!([2, 4])).unwrap(),
            Limit::Range { offset: 2, count: 4 }
        );
        for bad in [json!("7"), json!([1, 2, 3]), json!([1]), json!(-1), json!(null), json!(1.5)] {
            let err = Limit::try_from(&bad).unwrap_err();
            assert!(matches!(err, DataError::InvalidArgument(_)), "{bad}");
        }
    }

    #[test]
    fn test_rewrite_placeholders() {
        let sql = "select * from t where a=? and b='?' and c=?";
        assert_eq!(Dialect::MySql.rewrite_placeholders(sql), sql);
        assert_eq!(
            Dialect::Postgres.rewrite_placeholders(sql),
            "select * from t where a=$1 and b='?' and c=$2"
        );
    }

    #[test]
    fn test_sqlite_declares_booleans_as_integers() {
        assert_eq!(Dialect::Sqlite.column_type("boolean"), "integer");
        assert_eq!(Dialect::Sqlite.column_type("BOOL"), "integer");
        assert_eq!(Dialect::Sqlite.column_type("varchar(50)"), "varchar(50)");
        assert_eq!(Dialect::MySql.column_type("boolean"), "boolean");
        assert_eq!(Dialect::Postgres.column_type("boolean"), "boolean");
    }

    #[test]
    fn test_identifier_validation() {
        assert!(is_valid_identifier("created_at"));
        assert!(is_valid_identifier("_x1"));
        assert!(!is_valid_identifier("1abc"));
        assert!(!is_valid_identifier("users;drop"));
        assert!(!is_valid_identifier(""));
    }
}
