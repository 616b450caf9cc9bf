use awe_data::Value;
use chrono::Utc;
use uuid::Uuid;

/// Length of every generated id.
pub const ID_LEN: usize = 50;

/// A new primary key: 15-digit millisecond timestamp, a random v4 UUID in
/// hex, then `000`.
///
/// Ids generated in later milliseconds sort after earlier ones.
pub fn next_id() -> Value {
    Value::Text(format!(
        "{:015}{}000",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    ))
}

/// Current time as fractional Unix seconds.
pub fn now() -> Value {
    Value::Float(Utc::now().timestamp_micros() as f64 / 1_000_000.0)
}
