use crate::error::SqlxErrorExt;
use awe_data::DataError;
use sqlx::{Any, AnyConnection, Transaction};
use std::ops::{Deref, DerefMut};

/// A transaction on a pooled connection.
///
/// Dropping it without [`Tx::commit`] rolls the work back, and the connection
/// returns to the pool either way.
pub struct Tx(pub Transaction<'static, Any>);

impl Deref for Tx {
    type Target = Transaction<'static, Any>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Tx {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Tx {
    /// Unwraps the `Tx` into the inner `Transaction`.
    pub fn into_inner(self) -> Transaction<'static, Any> {
        self.0
    }

    /// Returns a mutable reference to the underlying connection.
    pub fn as_mut(&mut self) -> &mut AnyConnection {
        &mut *self.0
    }

    pub async fn commit(self) -> Result<(), DataError> {
        self.0.commit().await.map_err(SqlxErrorExt::into_data_error)
    }

    pub async fn rollback(self) -> Result<(), DataError> {
        self.0.rollback().await.map_err(SqlxErrorExt::into_data_error)
    }
}
