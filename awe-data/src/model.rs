use crate::entity::Entity;
use crate::error::DataError;
use crate::executor::Executor;
use crate::query::FindAll;
use crate::record::Record;
use crate::value::Value;
use std::fmt;
use std::future::Future;

/// Kind of write statement behind a [`WriteOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Insert,
    Update,
    Remove,
}

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOp::Insert => write!(f, "insert"),
            WriteOp::Update => write!(f, "update"),
            WriteOp::Remove => write!(f, "remove"),
        }
    }
}

/// Affected-row report of `save`, `update` and `remove`.
///
/// A single-row write is expected. Any other count is logged as a warning
/// and left for the caller to act on: the write is not rolled back or
/// retried. Use [`ensure_exact`](Self::ensure_exact) to turn it into an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    pub op: WriteOp,
    pub affected: u64,
}

impl WriteOutcome {
    pub const EXPECTED_ROWS: u64 = 1;

    fn record(op: WriteOp, affected: u64, table: &str) -> Self {
        if affected != Self::EXPECTED_ROWS {
            tracing::warn!(table, affected, "failed to {op} record by primary key");
        }
        Self { op, affected }
    }

    pub fn is_exact(&self) -> bool {
        self.affected == Self::EXPECTED_ROWS
    }

    pub fn ensure_exact(self) -> Result<Self, DataError> {
        if self.is_exact() {
            Ok(self)
        } else {
            Err(DataError::AffectedRows {
                op: self.op,
                expected: Self::EXPECTED_ROWS,
                actual: self.affected,
            })
        }
    }
}

/// Persistence operations available on every [`Entity`].
///
/// All operations take the executor explicitly (usually a pooled
/// `DbPool`) and may suspend while waiting on the store.
pub trait Model: Entity {
    /// Find one instance by primary key; `None` when no row matches.
    fn find<E: Executor>(
        db: &E,
        pk: impl Into<Value> + Send,
    ) -> impl Future<Output = Result<Option<Self>, DataError>> + Send;

    /// Find all instances matching a filter, in the order the store returns them.
    fn find_all<E: Executor>(
        db: &E,
        query: FindAll,
    ) -> impl Future<Output = Result<Vec<Self>, DataError>> + Send;

    /// Evaluate an aggregate such as `count(*)` over the table.
    ///
    /// Returns `None` if the store yields no row at all.
    fn count_by<E: Executor>(
        db: &E,
        expression: &str,
        where_clause: Option<&str>,
        args: Vec<Value>,
    ) -> impl Future<Output = Result<Option<Value>, DataError>> + Send;

    /// Insert this instance. Unset fields, primary key included, take their
    /// defaults, which are then kept on the instance.
    fn save<E: Executor>(
        &mut self,
        db: &E,
    ) -> impl Future<Output = Result<WriteOutcome, DataError>> + Send;

    /// Write the current field values back, keyed by primary key.
    /// Unset fields are written as `NULL`.
    fn update<E: Executor>(
        &self,
        db: &E,
    ) -> impl Future<Output = Result<WriteOutcome, DataError>> + Send;

    /// Delete the row with this instance's primary key.
    fn remove<E: Executor>(
        &self,
        db: &E,
    ) -> impl Future<Output = Result<WriteOutcome, DataError>> + Send;
}

impl<T: Entity> Model for T {
    fn find<E: Executor>(
        db: &E,
        pk: impl Into<Value> + Send,
    ) -> impl Future<Output = Result<Option<Self>, DataError>> + Send {
        let pk = pk.into();
        async move {
            let schema = Self::schema();
            let sql = format!(
                "{} where {}=? limit 1",
                schema.select_sql(),
                schema.quote(schema.primary_key())
            );
            let args = [pk];
            let rows = db.query(&sql, &args, Some(1)).await?;
            Ok(rows
                .into_iter()
                .next()
                .map(|row| Self::from_record(Record::from(schema.normalize(row)))))
        }
    }

    fn find_all<E: Executor>(
        db: &E,
        query: FindAll,
    ) -> impl Future<Output = Result<Vec<Self>, DataError>> + Send {
        async move {
            let schema = Self::schema();
            let (sql, args) = query.build(schema);
            let rows = db.query(&sql, &args, None).await?;
            Ok(rows
                .into_iter()
                .map(|row| Self::from_record(Record::from(schema.normalize(row))))
                .collect())
        }
    }

    fn count_by<E: Executor>(
        db: &E,
        expression: &str,
        where_clause: Option<&str>,
        args: Vec<Value>,
    ) -> impl Future<Output = Result<Option<Value>, DataError>> + Send {
        let schema = Self::schema();
        let mut sql = format!(
            "select {expression} as count from {}",
            schema.quote(schema.table())
        );
        if let Some(clause) = where_clause.filter(|c| !c.is_empty()) {
            sql.push_str(" where ");
            sql.push_str(clause);
        }
        async move {
            let rows = db.query(&sql, &args, Some(1)).await?;
            let Some(mut row) = rows.into_iter().next() else {
                return Ok(None);
            };
            Ok(Some(row.remove("count").unwrap_or(Value::Null)))
        }
    }

    fn save<E: Executor>(
        &mut self,
        db: &E,
    ) -> impl Future<Output = Result<WriteOutcome, DataError>> + Send {
        async move {
            let schema = Self::schema();
            let mut args: Vec<Value> = schema
                .fields()
                .iter()
                .map(|field| self.value_or_default(field))
                .collect();
            args.push(self.value_or_default(schema.primary_key()));
            let affected = db.execute(schema.insert_sql(), &args, true).await?;
            Ok(WriteOutcome::record(WriteOp::Insert, affected, schema.table()))
        }
    }

    fn update<E: Executor>(
        &self,
        db: &E,
    ) -> impl Future<Output = Result<WriteOutcome, DataError>> + Send {
        async move {
            let schema = Self::schema();
            let mut args: Vec<Value> = schema.fields().iter().map(|field| self.value(field)).collect();
            args.push(self.id());
            let affected = db.execute(schema.update_sql(), &args, true).await?;
            Ok(WriteOutcome::record(WriteOp::Update, affected, schema.table()))
        }
    }

    fn remove<E: Executor>(
        &self,
        db: &E,
    ) -> impl Future<Output = Result<WriteOutcome, DataError>> + Send {
        async move {
            let schema = Self::schema();
            let args = [self.id()];
            let affected = db.execute(schema.delete_sql(), &args, true).await?;
            Ok(WriteOutcome::record(WriteOp::Remove, affected, schema.table()))
        }
    }
}
