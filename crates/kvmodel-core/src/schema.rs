mod field;
pub use field::{AutoStrategy, Field, FieldOptions, FieldTy};

mod model;
pub use model::{Model, ModelBuilder};

mod relation;
pub use relation::{BelongsTo, BelongsToOptions, HasMany};

mod validator;
pub use validator::Validator;

mod verify;

use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// Every model registered with a database, keyed by model name.
#[derive(Debug, Default)]
pub struct Schema {
    models: IndexMap<String, Arc<Model>>,
}

impl Schema {
    /// Builds a schema from a set of models and verifies that their
    /// relations resolve.
    pub fn from_models(models: impl IntoIterator<Item = Model>) -> Result<Schema> {
        let mut schema = Schema::default();

        for model in models {
            if schema.models.contains_key(&model.name) {
                return Err(Error::invalid_schema(format!(
                    "model `{}` is registered twice",
                    model.name
                )));
            }

            schema.models.insert(model.name.clone(), Arc::new(model));
        }

        schema.verify()?;
        Ok(schema)
    }

    pub fn model(&self, name: &str) -> Option<&Arc<Model>> {
        self.models.get(name)
    }

    /// Like [`Schema::model`] but fails if the model is not registered.
    pub fn expect_model(&self, name: &str) -> Result<&Arc<Model>> {
        self.model(name)
            .ok_or_else(|| Error::invalid_schema(format!("model `{name}` is not registered")))
    }

    pub fn models(&self) -> impl ExactSizeIterator<Item = &Model> {
        self.models.values().map(|model| &**model)
    }
}
