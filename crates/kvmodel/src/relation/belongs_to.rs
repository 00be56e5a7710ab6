use crate::{engine::Engine, schema::Model, Record, Result};

use std::sync::Arc;

/// The parent a record points at through its foreign key.
#[derive(Debug, Clone)]
pub struct BelongsTo<'a> {
    engine: &'a Engine,
    parent: Arc<Model>,
    id: Option<String>,
}

impl<'a> BelongsTo<'a> {
    pub(crate) fn new(engine: &'a Engine, parent: Arc<Model>, id: Option<String>) -> BelongsTo<'a> {
        BelongsTo { engine, parent, id }
    }

    /// The parent id, if the foreign key is set.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Fetches the parent. `None` if the foreign key is unset or points at
    /// a record that does not exist.
    pub async fn get(&self) -> Result<Option<Record>> {
        match &self.id {
            Some(id) => self.engine.fetch(&self.parent, id).await,
            None => Ok(None),
        }
    }
}
