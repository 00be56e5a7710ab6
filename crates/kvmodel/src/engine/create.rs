use super::Engine;
use crate::{
    driver::operation::{Delete, HashSet, SetAdd},
    index::IndexChange,
    schema::{AutoStrategy, Model},
    Error, Reason, Record, RecordState, Result, Value,
};

use tracing::{debug, warn};

impl Engine {
    /// Persists a new record.
    ///
    /// Uniqueness and validation run before anything is written, so a failed
    /// create leaves no trace in the store.
    pub(crate) async fn create(&self, record: &mut Record) -> Result<()> {
        if record.state() != RecordState::Unpersisted {
            return Err(Error::invalid_state(format!(
                "cannot create a record in the {:?} state",
                record.state()
            )));
        }

        let mut candidate = record.clone();
        let model = candidate.model().clone();
        let kind = model.name.as_str();

        populate_auto_fields(&mut candidate);

        let Some(id) = candidate.id().map(str::to_string) else {
            return Err(Error::invalid_data([(Model::ID, Reason::Missing)]));
        };

        if self.exists(kind, &id).await? {
            return Err(Error::duplicate_field(Model::ID, id));
        }

        let changes: Vec<_> = model
            .indexed_fields()
            .filter_map(|field| IndexChange::between(field, None, candidate.get(&field.name)?))
            .collect();

        self.check_unique(kind, &id, &changes).await?;
        candidate.validate()?;
        let claims = self.claim_unique(kind, &id, &changes).await?;

        debug!(kind, id = %id, "create");

        // Until the id joins the model id set the record does not exist,
        // so a failure up to here takes its claims back
        if let Err(err) = self.store_new(&candidate, &id).await {
            self.release_claims(kind, &id, &claims).await;
            return Err(err);
        }

        self.index(kind, &id, &changes).await?;
        self.link_parents(&candidate, &id).await?;

        candidate.mark_persisted(id);
        *record = candidate;
        Ok(())
    }

    /// Writes the record hash, then adds the id to the model id set.
    async fn store_new(&self, record: &Record, id: &str) -> Result<()> {
        let kind = record.kind();
        let key = self.keys.record(kind, id);

        self.exec(HashSet {
            key: key.clone(),
            pairs: record.snapshot_for_persist().into_iter().collect(),
        })
        .await?;

        let added = self
            .exec(SetAdd {
                key: self.keys.model_ids(kind),
                member: id.to_string(),
            })
            .await;

        if let Err(err) = added {
            if let Err(cleanup) = self.exec(Delete { key }).await {
                warn!(kind, id, err = %cleanup, "failed to remove hash of an uncreated record");
            }
            return Err(err);
        }

        Ok(())
    }

    /// Adds a new record to the child set of every parent that exists.
    async fn link_parents(&self, record: &Record, id: &str) -> Result<()> {
        for rel in &record.model().belongs_to {
            let Some(parent_id) = record.get_str(&rel.foreign_key).filter(|s| !s.is_empty()) else {
                continue;
            };

            if self.exists(&rel.target, parent_id).await? {
                self.exec(SetAdd {
                    key: self.keys.children(&rel.target, parent_id, record.kind()),
                    member: id.to_string(),
                })
                .await?;
            }
        }

        Ok(())
    }
}

fn populate_auto_fields(record: &mut Record) {
    let model = record.model().clone();

    for field in model.fields() {
        let blank = record.get(&field.name).map_or(true, Value::is_blank);

        match field.auto {
            Some(AutoStrategy::Uuid) if blank => {
                record.set_coerced(&field.name, Value::String(uuid::Uuid::new_v4().to_string()));
            }
            Some(AutoStrategy::CreatedAt | AutoStrategy::UpdatedAt) => {
                record.set_coerced(&field.name, AutoStrategy::now());
            }
            _ => {}
        }
    }
}
