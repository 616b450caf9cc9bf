use crate::error::DataError;
use crate::record::Row;
use crate::value::Value;
use std::future::Future;

/// Runs parameterized SQL against a store.
///
/// Statements use `?` placeholders; implementations translate them to the
/// store's native syntax. Uses RPITIT, no `async-trait` needed.
///
/// `awe-data-sqlx` implements this for its pooled `DbPool`.
pub trait Executor: Send + Sync {
    /// Run a read statement, returning at most `limit` rows (all rows if `None`).
    fn query<'a>(
        &'a self,
        sql: &'a str,
        args: &'a [Value],
        limit: Option<usize>,
    ) -> impl Future<Output = Result<Vec<Row>, DataError>> + Send + 'a;

    /// Run a write statement, returning the affected-row count.
    ///
    /// With `autocommit == false` the statement runs inside an explicit
    /// transaction that is committed on success and rolled back on failure.
    fn execute<'a>(
        &'a self,
        sql: &'a str,
        args: &'a [Value],
        autocommit: bool,
    ) -> impl Future<Output = Result<u64, DataError>> + Send + 'a;
}
