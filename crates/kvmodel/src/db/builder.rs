use super::Db;
use crate::{driver::Driver, engine::Engine, schema, Error, KeySpace, Model, Result, Schema, UniquenessPolicy};

use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct Builder {
    models: Vec<schema::Model>,

    /// First error hit while registering models, reported by `build`
    error: Option<Error>,

    key_prefix: String,

    uniqueness: UniquenessPolicy,
}

impl Builder {
    pub fn register<M: Model>(&mut self) -> &mut Self {
        match M::schema() {
            Ok(model) if model.name == M::NAME => self.models.push(model),
            Ok(model) => self.fail(Error::invalid_schema(format!(
                "model `{}` declares schema for `{}`",
                M::NAME,
                model.name
            ))),
            Err(err) => self.fail(err),
        }
        self
    }

    /// Registers a model built at runtime.
    pub fn model(&mut self, model: schema::Model) -> &mut Self {
        self.models.push(model);
        self
    }

    /// Prepended to every store key
    pub fn key_prefix(&mut self, prefix: &str) -> &mut Self {
        self.key_prefix = prefix.to_string();
        self
    }

    pub fn uniqueness(&mut self, policy: UniquenessPolicy) -> &mut Self {
        self.uniqueness = policy;
        self
    }

    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        let driver = super::connect::connect(url)?;
        self.build_with(driver)
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        self.build_with(Arc::new(driver))
    }

    pub(crate) fn build_with(&mut self, driver: Arc<dyn Driver>) -> Result<Db> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }

        let schema = Schema::from_models(self.models.iter().cloned())?;

        let mut uniqueness = self.uniqueness;
        if uniqueness == UniquenessPolicy::Claim && !driver.capability().atomic_hash_set_if_absent {
            warn!(?driver, "driver has no atomic set-if-absent; falling back to check-then-set");
            uniqueness = UniquenessPolicy::CheckThenSet;
        }

        debug!(
            models = schema.models().len(),
            prefix = %self.key_prefix,
            ?uniqueness,
            "database ready"
        );

        Ok(Db {
            engine: Engine {
                schema: Arc::new(schema),
                driver,
                keys: KeySpace::new(&self.key_prefix),
                uniqueness,
            },
        })
    }

    fn fail(&mut self, err: Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}
