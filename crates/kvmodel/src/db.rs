mod builder;
pub use builder::Builder;

mod connect;

use crate::{
    driver::Driver,
    engine::{Engine, UpdateOptions, Validation},
    BelongsTo, Collection, Error, Fields, HasMany, Model, Record, Result, Schema, Value,
};

use std::sync::Arc;

/// Handle to a key-value store and the models registered against it.
///
/// Cloning is cheap; clones share the driver and the schema.
#[derive(Debug, Clone)]
pub struct Db {
    engine: Engine,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.engine.schema
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.engine.driver
    }

    /// Class-level operations for a model declared in code.
    pub fn collection<M: Model>(&self) -> Result<Collection<'_>> {
        self.collection_named(M::NAME)
    }

    /// Class-level operations for a registered model.
    pub fn collection_named(&self, kind: &str) -> Result<Collection<'_>> {
        let model = self.engine.schema.expect_model(kind)?.clone();
        Ok(Collection::new(self, model))
    }

    /// Applies the fields marked updatable and saves with validation.
    /// Other fields in `fields` are ignored.
    pub async fn update(&self, record: &mut Record, fields: Fields) -> Result<()> {
        let options = UpdateOptions {
            all: false,
            validate: true,
        };
        self.engine.update(record, fields, options).await
    }

    /// Applies every field in `fields` and saves without validation.
    /// Uniqueness is still enforced.
    pub async fn update_all(&self, record: &mut Record, fields: Fields) -> Result<()> {
        let options = UpdateOptions {
            all: true,
            validate: false,
        };
        self.engine.update(record, fields, options).await
    }

    /// Sets and saves a single field, validating only that field. Does
    /// nothing when the value is unchanged.
    pub async fn update_field(&self, record: &mut Record, name: &str, value: impl Into<Value>) -> Result<()> {
        self.engine.update_field(record, name, value.into()).await
    }

    /// Validates, then writes the record's pending changes.
    pub async fn save(&self, record: &mut Record) -> Result<()> {
        self.engine.save(record, Validation::All).await
    }

    /// Writes the record's pending changes without validating.
    pub async fn save_unchecked(&self, record: &mut Record) -> Result<()> {
        self.engine.save(record, Validation::Skip).await
    }

    /// Deletes the record and everything it has many of. Deleting an
    /// already deleted record does nothing.
    pub async fn delete(&self, record: &mut Record) -> Result<()> {
        self.engine.delete(record).await
    }

    /// Re-reads the record from the store, discarding unsaved changes.
    pub async fn reload(&self, record: &mut Record) -> Result<()> {
        self.engine.reload(record).await
    }

    /// The children of `kind` that `parent` has many of.
    pub fn has_many(&self, parent: &Record, kind: &str) -> Result<HasMany<'_>> {
        if parent.model().has_many(kind).is_none() {
            return Err(Error::invalid_schema(format!(
                "`{}` does not have many `{kind}`",
                parent.kind()
            )));
        }

        let Some(parent_id) = persisted_id(parent) else {
            return Err(Error::invalid_state(
                "relations of a record are available once it is created",
            ));
        };

        let child = self.engine.schema.expect_model(kind)?.clone();
        let key = self.engine.keys.children(parent.kind(), parent_id, kind);
        Ok(HasMany::new(&self.engine, child, key))
    }

    /// The `kind` record that `child` belongs to.
    pub fn belongs_to(&self, child: &Record, kind: &str) -> Result<BelongsTo<'_>> {
        let Some(rel) = child.model().belongs_to(kind) else {
            return Err(Error::invalid_schema(format!(
                "`{}` does not belong to `{kind}`",
                child.kind()
            )));
        };

        let parent = self.engine.schema.expect_model(kind)?.clone();
        let id = child
            .get_str(&rel.foreign_key)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        Ok(BelongsTo::new(&self.engine, parent, id))
    }

    /// Removes every key from the store. Used by tests.
    pub async fn reset_db(&self) -> Result<()> {
        self.engine.driver.reset_db().await
    }

    pub(crate) fn engine(&self) -> &Engine {
        &self.engine
    }
}

fn persisted_id(record: &Record) -> Option<&str> {
    if record.is_persisted() {
        record.id()
    } else {
        None
    }
}
