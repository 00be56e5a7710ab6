use super::Engine;
use crate::{
    driver::operation::{HashSet, SetAdd, SetRemove},
    index::IndexChange,
    schema::{AutoStrategy, Model},
    Error, Fields, Record, RecordState, Result, Value,
};

use tracing::debug;

/// Which fields a flush validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Validation<'a> {
    All,
    Field(&'a str),
    Skip,
}

/// Options for [`Engine::update`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct UpdateOptions {
    /// Apply fields not marked updatable
    pub(crate) all: bool,

    pub(crate) validate: bool,
}

impl Engine {
    /// Applies `fields` to the record and writes it. Nothing is applied
    /// unless the whole update succeeds.
    pub(crate) async fn update(&self, record: &mut Record, fields: Fields, options: UpdateOptions) -> Result<()> {
        let mut candidate = record.clone();

        for (name, value) in fields {
            let field = candidate.model().expect_field(&name)?;

            if options.all || field.updatable {
                candidate.set(&name, value)?;
            }
        }

        let validation = if options.validate {
            Validation::All
        } else {
            Validation::Skip
        };

        self.flush(&mut candidate, validation).await?;
        *record = candidate;
        Ok(())
    }

    /// Writes the record. On failure the record is left untouched.
    pub(crate) async fn save(&self, record: &mut Record, validation: Validation<'_>) -> Result<()> {
        let mut candidate = record.clone();
        self.flush(&mut candidate, validation).await?;
        *record = candidate;
        Ok(())
    }

    /// Sets one field and writes it, validating only that field.
    pub(crate) async fn update_field(&self, record: &mut Record, name: &str, value: Value) -> Result<()> {
        let field = record.model().expect_field(name)?;
        let value = field.coerce(value);

        if record.get(name) == Some(&value) {
            return Ok(());
        }

        let mut candidate = record.clone();
        candidate.set(name, value)?;

        self.flush(&mut candidate, Validation::Field(name)).await?;
        *record = candidate;
        Ok(())
    }

    /// Writes the record's dirty fields, maintaining indexes and the parent
    /// link. Checks run before the first write.
    async fn flush(&self, record: &mut Record, validation: Validation<'_>) -> Result<()> {
        let id = match (record.state(), record.id()) {
            (RecordState::Persisted, Some(id)) => id.to_string(),
            (RecordState::Deleted, _) => {
                return Err(Error::invalid_state("cannot save a deleted record"))
            }
            _ => return Err(Error::invalid_state("cannot save a record before it is created")),
        };

        if record.persisted_value(Model::ID) != record.get(Model::ID) {
            return Err(Error::invalid_state("the id of a persisted record cannot change"));
        }

        let model = record.model().clone();
        let kind = model.name.as_str();

        for field in model.fields() {
            if field.auto == Some(AutoStrategy::UpdatedAt) {
                record.set_coerced(&field.name, AutoStrategy::now());
            }
        }

        let changes: Vec<_> = model
            .indexed_fields()
            .filter_map(|field| {
                let current = record.get(&field.name)?;
                IndexChange::between(field, record.persisted_value(&field.name), current)
            })
            .collect();

        self.check_unique(kind, &id, &changes).await?;

        match validation {
            Validation::All => record.validate()?,
            Validation::Field(name) => record.validate_field(name)?,
            Validation::Skip => {}
        }

        let claims = self.claim_unique(kind, &id, &changes).await?;

        let pairs: Vec<_> = record.snapshot_for_persist().into_iter().collect();

        if pairs.is_empty() {
            debug!(kind, id = %id, "save skipped; nothing to write");
        } else {
            debug!(kind, id = %id, fields = pairs.len(), "save");
            let written = self
                .exec(HashSet {
                    key: self.keys.record(kind, &id),
                    pairs,
                })
                .await;

            // Old entries are still in place; only the new claims go
            if let Err(err) = written {
                self.release_claims(kind, &id, &claims).await;
                return Err(err);
            }
        }

        self.unindex(kind, &id, &changes).await?;
        self.index(kind, &id, &changes).await?;
        self.reparent(record, &id).await?;

        record.mark_persisted(id);
        Ok(())
    }

    /// Moves the record between parents' child sets when a foreign key
    /// changed since the last write.
    async fn reparent(&self, record: &Record, id: &str) -> Result<()> {
        let kind = record.kind();

        for rel in &record.model().belongs_to {
            let old = record.persisted_value(&rel.foreign_key).and_then(Value::as_str);
            let new = record.get_str(&rel.foreign_key);

            if old == new {
                continue;
            }

            if let Some(old) = old.filter(|old| !old.is_empty()) {
                self.exec(SetRemove {
                    key: self.keys.children(&rel.target, old, kind),
                    member: id.to_string(),
                })
                .await?;
            }

            if let Some(new) = new.filter(|new| !new.is_empty()) {
                if self.exists(&rel.target, new).await? {
                    self.exec(SetAdd {
                        key: self.keys.children(&rel.target, new, kind),
                        member: id.to_string(),
                    })
                    .await?;
                }
            }

            debug!(kind, id, parent = %rel.target, from = ?old, to = ?new, "reparent");
        }

        Ok(())
    }
}
