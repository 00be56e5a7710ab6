pub mod collection;
pub use collection::Collection;

pub mod db;
pub use db::Db;

mod engine;

mod index;
pub use index::UniquenessPolicy;

mod key;
pub use key::KeySpace;

mod model;
pub use model::Model;

pub mod record;
pub use record::{Record, RecordState};

pub mod relation;
pub use relation::{BelongsTo, HasMany};

pub use kvmodel_core::{
    bail, driver, err, fields, schema, Error, Fields, Reason, Result, Schema, Value,
};
