//! # awe-data: store-agnostic ORM layer
//!
//! Entities are declared as a set of [`FieldDescriptor`]s; the
//! [`EntitySchema`] derived from them carries the table name, the primary
//! key and the four canonical SQL statements. Instances are plain
//! [`Record`]s, and [`Model`] adds the async persistence operations on top
//! of any [`Executor`] (see `awe-data-sqlx` for the pooled SQLx one).
//!
//! ```ignore
//! use awe_data::prelude::*;
//!
//! awe_data::entity! {
//!     pub struct Player {
//!         table = "players";
//!         id: FieldDescriptor::string().primary_key().default_with(next_id),
//!         name: FieldDescriptor::string(),
//!         score: FieldDescriptor::float(),
//!     }
//! }
//!
//! let mut player = Player::new();
//! player.set("name", "ann");
//! player.save(&pool).await?;
//! let top = Player::find_all(&pool, FindAll::new().order_by("`score` desc").limit(10u64)).await?;
//! ```

pub mod entity;
pub mod error;
pub mod executor;
pub mod field;
pub mod model;
pub mod query;
pub mod record;
pub mod schema;
pub mod value;

pub use entity::Entity;
pub use error::{DataError, DefinitionError};
pub use executor::Executor;
pub use field::{FieldDefault, FieldDescriptor, FieldKind, Generator};
pub use model::{Model, WriteOp, WriteOutcome};
pub use query::{Dialect, FindAll, Limit};
pub use record::{Record, Row};
pub use schema::{EntitySchema, SchemaBuilder};
pub use value::Value;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}

pub mod prelude {
    //! Re-exports of the most commonly used data types.
    pub use crate::{
        DataError, Entity, EntitySchema, Executor, FieldDescriptor, FindAll, Limit, Model, Record,
        Value, WriteOutcome,
    };
}
