use crate::{engine::Engine, schema::Model, Db, Error, Fields, Record, Result, Value};

use std::sync::Arc;

/// Class-level operations on one entity kind.
#[derive(Debug, Clone)]
pub struct Collection<'a> {
    db: &'a Db,
    model: Arc<Model>,
}

impl<'a> Collection<'a> {
    pub(crate) fn new(db: &'a Db, model: Arc<Model>) -> Collection<'a> {
        Collection { db, model }
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    fn engine(&self) -> &Engine {
        self.db.engine()
    }

    /// Builds an unpersisted record from `fields`, coercing each value.
    pub fn build(&self, fields: Fields) -> Result<Record> {
        let mut record = Record::new(self.model.clone());

        for (name, value) in fields {
            record.set(&name, value)?;
        }

        Ok(record)
    }

    /// Builds and persists a record. Ids are assigned to kinds whose `id`
    /// is required.
    pub async fn create(&self, fields: Fields) -> Result<Record> {
        let mut record = self.build(fields)?;
        self.insert(&mut record).await?;
        Ok(record)
    }

    /// Persists a record built with [`Collection::build`].
    pub async fn insert(&self, record: &mut Record) -> Result<()> {
        if record.kind() != self.model.name {
            return Err(Error::invalid_state(format!(
                "cannot insert a `{}` record into `{}`",
                record.kind(),
                self.model.name
            )));
        }

        self.engine().create(record).await
    }

    pub async fn fetch(&self, id: &str) -> Result<Option<Record>> {
        self.engine().fetch(&self.model, id).await
    }

    pub async fn fetch_all(&self) -> Result<Vec<Record>> {
        self.engine().fetch_all(&self.model).await
    }

    /// Fetches the record an indexed field's value maps to. Lookups ignore
    /// case and surrounding whitespace.
    pub async fn fetch_by(&self, field: &str, value: impl Into<Value>) -> Result<Option<Record>> {
        match self.id_for(field, value).await? {
            Some(id) => self.fetch(&id).await,
            None => Ok(None),
        }
    }

    /// The id an indexed field's value maps to.
    pub async fn id_for(&self, field: &str, value: impl Into<Value>) -> Result<Option<String>> {
        let field = self.model.expect_field(field)?;

        if !field.indexed {
            return Err(Error::invalid_schema(format!(
                "`{}.{}` is not indexed",
                self.model.name, field.name
            )));
        }

        let value = field.coerce(value.into());
        self.engine().id_for(&self.model.name, field, &value).await
    }

    /// True if a record already holds this value of a unique field.
    pub async fn is_taken(&self, field: &str, value: impl Into<Value>) -> Result<bool> {
        Ok(self.id_for(field, value).await?.is_some())
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        self.engine().exists(&self.model.name, id).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.engine().count(&self.model.name).await
    }

    pub async fn list_ids(&self) -> Result<Vec<String>> {
        self.engine().list_ids(&self.model.name).await
    }

    /// Deletes the record with `id` and everything it has many of. A
    /// missing id is not an error.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.engine().delete_by_id(&self.model, id).await
    }
}
