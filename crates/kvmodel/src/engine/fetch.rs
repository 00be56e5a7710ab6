use super::Engine;
use crate::{
    driver::operation::{HashGetAll, SetCardinality, SetMembers},
    schema::Model,
    Error, Record, RecordState, Result,
};

use std::sync::Arc;
use tracing::debug;

impl Engine {
    /// Loads a record, or `None` if `id` is not in the model id set.
    pub(crate) async fn fetch(&self, model: &Arc<Model>, id: &str) -> Result<Option<Record>> {
        if id.is_empty() || !self.exists(&model.name, id).await? {
            return Ok(None);
        }

        let hash = self
            .exec(HashGetAll {
                key: self.keys.record(&model.name, id),
            })
            .await?
            .into_hash()?;

        Ok(Some(Record::load(model.clone(), id.to_string(), hash)))
    }

    /// Every persisted id of a kind, sorted.
    pub(crate) async fn list_ids(&self, kind: &str) -> Result<Vec<String>> {
        let members = self
            .exec(SetMembers {
                key: self.keys.model_ids(kind),
            })
            .await?
            .into_members()?;

        Ok(members.into_iter().collect())
    }

    pub(crate) async fn fetch_all(&self, model: &Arc<Model>) -> Result<Vec<Record>> {
        let mut records = vec![];

        for id in self.list_ids(&model.name).await? {
            // Skips records deleted since the id set was read
            if let Some(record) = self.fetch(model, &id).await? {
                records.push(record);
            }
        }

        Ok(records)
    }

    pub(crate) async fn count(&self, kind: &str) -> Result<u64> {
        self.exec(SetCardinality {
            key: self.keys.model_ids(kind),
        })
        .await?
        .into_count()
    }

    /// Replaces the record with its stored state, discarding unsaved
    /// changes.
    pub(crate) async fn reload(&self, record: &mut Record) -> Result<()> {
        let id = match (record.state(), record.id()) {
            (RecordState::Persisted, Some(id)) => id.to_string(),
            (state, _) => {
                return Err(Error::invalid_state(format!(
                    "cannot reload a record in the {state:?} state"
                )))
            }
        };

        debug!(kind = record.kind(), id = %id, "reload");

        match self.fetch(record.model(), &id).await? {
            Some(fresh) => {
                *record = fresh;
                Ok(())
            }
            None => Err(Error::record_not_found(format!("{}:{id}", record.kind()))),
        }
    }
}
