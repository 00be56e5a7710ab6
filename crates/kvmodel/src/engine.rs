mod create;
mod delete;
mod fetch;
mod flush;

pub(crate) use flush::{UpdateOptions, Validation};

use crate::{
    driver::{operation::SetIsMember, Driver, Operation, Response},
    KeySpace, Result, Schema, UniquenessPolicy,
};

use std::sync::Arc;
use tracing::trace;

/// Runs mapper operations as sequences of store primitives.
#[derive(Debug, Clone)]
pub(crate) struct Engine {
    pub(crate) schema: Arc<Schema>,
    pub(crate) driver: Arc<dyn Driver>,
    pub(crate) keys: KeySpace,
    pub(crate) uniqueness: UniquenessPolicy,
}

impl Engine {
    pub(crate) async fn exec(&self, op: impl Into<Operation>) -> Result<Response> {
        let op = op.into();
        trace!(op = op.name(), key = op.key(), "exec");
        self.driver.exec(op).await
    }

    /// True if `id` is in the model id set of `kind`.
    pub(crate) async fn exists(&self, kind: &str, id: &str) -> Result<bool> {
        self.exec(SetIsMember {
            key: self.keys.model_ids(kind),
            member: id.to_string(),
        })
        .await?
        .into_bool()
    }
}
