use crate::convert::{bind_all, decode_row};
use crate::error::SqlxErrorExt;
use crate::pool::DbPool;
use awe_data::{DataError, Executor, Row, Value};
use futures_util::TryStreamExt;
use std::future::Future;

impl Executor for DbPool {
    fn query<'a>(
        &'a self,
        sql: &'a str,
        args: &'a [Value],
        limit: Option<usize>,
    ) -> impl Future<Output = Result<Vec<Row>, DataError>> + Send + 'a {
        async move {
            tracing::info!(%sql, args = args.len(), "SQL");
            let sql = self.dialect().rewrite_placeholders(sql);
            let mut conn = self
                .pool()
                .acquire()
                .await
                .map_err(SqlxErrorExt::into_data_error)?;

            let mut rows = Vec::new();
            let mut stream = bind_all(sqlx::query(sql.as_ref()), args).fetch(&mut *conn);
            while limit.is_none_or(|n| rows.len() < n) {
                match stream.try_next().await.map_err(DataError::database)? {
                    Some(row) => rows.push(decode_row(&row)?),
                    None => break,
                }
            }
            drop(stream);

            tracing::info!(rows = rows.len(), "rows returned");
            Ok(rows)
        }
    }

    fn execute<'a>(
        &'a self,
        sql: &'a str,
        args: &'a [Value],
        autocommit: bool,
    ) -> impl Future<Output = Result<u64, DataError>> + Send + 'a {
        async move {
            tracing::info!(%sql, args = args.len(), autocommit, "SQL");
            let sql = self.dialect().rewrite_placeholders(sql);
            let query = bind_all(sqlx::query(sql.as_ref()), args);

            if autocommit {
                let done = query
                    .execute(self.pool())
                    .await
                    .map_err(DataError::database)?;
                return Ok(done.rows_affected());
            }

            let mut tx = self.begin().await?;
            match query.execute(tx.as_mut()).await {
                Ok(done) => {
                    tx.commit().await?;
                    Ok(done.rows_affected())
                }
                Err(err) => {
                    if let Err(rollback_err) = tx.rollback().await {
                        tracing::warn!(error = %rollback_err, "rollback failed");
                    }
                    Err(DataError::database(err))
                }
            }
        }
    }
}
