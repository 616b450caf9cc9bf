use awe_data::{DataError, Row, Value};
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, Column, Row as _, TypeInfo, ValueRef};

pub(crate) type AnyQuery<'q> = Query<'q, Any, AnyArguments<'q>>;

/// Bind `args` positionally.
///
/// `Value::Null` is sent as a text-typed NULL. MySQL and SQLite accept that
/// for any column; Postgres rejects it for numeric and boolean columns, so
/// `update` on a Postgres pool needs every non-text field set.
pub(crate) fn bind_all<'q>(mut query: AnyQuery<'q>, args: &'q [Value]) -> AnyQuery<'q> {
    for arg in args {
        query = match arg {
            Value::Null => query.bind(None::<String>),
            Value::Bool(b) => query.bind(*b),
            Value::Int(i) => query.bind(*i),
            Value::Float(f) => query.bind(*f),
            Value::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}

/// Column name to value, in the driver's column order.
pub(crate) fn decode_row(row: &AnyRow) -> Result<Row, DataError> {
    let mut out = Row::new();
    for (index, column) in row.columns().iter().enumerate() {
        out.insert(column.name().to_string(), decode_column(row, index)?);
    }
    Ok(out)
}

fn decode_column(row: &AnyRow, index: usize) -> Result<Value, DataError> {
    let type_name = {
        let raw = row.try_get_raw(index).map_err(DataError::database)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        raw.type_info().name().to_ascii_uppercase()
    };

    let value = match type_name.as_str() {
        "BOOLEAN" | "BOOL" => {
            let flag = row
                .try_get::<bool, _>(index)
                .or_else(|_| row.try_get::<i64, _>(index).map(|i| i != 0))
                .map_err(DataError::database)?;
            Value::Bool(flag)
        }
        "SMALLINT" | "INTEGER" | "INT" | "BIGINT" => {
            Value::Int(row.try_get::<i64, _>(index).map_err(DataError::database)?)
        }
        "REAL" | "FLOAT" => Value::Float(decode_float(row, index, true)?),
        "DOUBLE" => Value::Float(decode_float(row, index, false)?),
        "BLOB" => {
            let bytes: Vec<u8> = row.try_get(index).map_err(DataError::database)?;
            Value::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
        _ => Value::Text(row.try_get(index).map_err(DataError::database)?),
    };
    Ok(value)
}

fn decode_float(row: &AnyRow, index: usize, single: bool) -> Result<f64, DataError> {
    let single_first = || row.try_get::<f32, _>(index).map(f64::from);
    let double_first = || row.try_get::<f64, _>(index);
    let result = if single {
        single_first().or_else(|_| double_first())
    } else {
        double_first().or_else(|_| single_first())
    };
    result.map_err(DataError::database)
}
