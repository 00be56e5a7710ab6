use super::Engine;
use crate::{
    driver::operation::{Delete, SetMembers, SetRemove},
    index::IndexChange,
    schema::Model,
    Error, Record, RecordState, Result, Value,
};

use async_recursion::async_recursion;
use std::sync::Arc;
use tracing::debug;

impl Engine {
    /// Deletes the record with `id`, if it exists.
    pub(crate) async fn delete_by_id(&self, model: &Arc<Model>, id: &str) -> Result<()> {
        match self.fetch(model, id).await? {
            Some(mut record) => self.delete(&mut record).await,
            None => Ok(()),
        }
    }

    /// Deletes a record and, depth first, every record it has many of.
    #[async_recursion]
    pub(crate) async fn delete(&self, record: &mut Record) -> Result<()> {
        let id = match (record.state(), record.id()) {
            (RecordState::Deleted, _) => return Ok(()),
            (RecordState::Persisted, Some(id)) => id.to_string(),
            _ => return Err(Error::invalid_state("cannot delete a record before it is created")),
        };

        let model = record.model().clone();
        let kind = model.name.as_str();

        for rel in &model.has_many {
            let child = self.schema.expect_model(&rel.target)?.clone();
            let children_key = self.keys.children(kind, &id, &child.name);

            let child_ids = self
                .exec(SetMembers {
                    key: children_key.clone(),
                })
                .await?
                .into_members()?;

            for child_id in child_ids {
                debug!(kind = %child.name, id = %child_id, parent = kind, "cascade delete");
                self.delete_by_id(&child, &child_id).await?;
            }
        }

        let removed = self
            .exec(SetRemove {
                key: self.keys.model_ids(kind),
                member: id.clone(),
            })
            .await?
            .into_bool()?;

        if removed {
            debug!(kind, id = %id, "delete");

            // Index entries are removed for the stored values, not unsaved edits
            let changes: Vec<_> = model
                .indexed_fields()
                .filter_map(|field| {
                    IndexChange::between(field, record.persisted_value(&field.name), &Value::Null)
                })
                .collect();
            self.unindex(kind, &id, &changes).await?;

            for rel in &model.belongs_to {
                let parent_id = record
                    .persisted_value(&rel.foreign_key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty());

                if let Some(parent_id) = parent_id {
                    self.exec(SetRemove {
                        key: self.keys.children(&rel.target, parent_id, kind),
                        member: id.clone(),
                    })
                    .await?;
                }
            }

            self.exec(Delete {
                key: self.keys.record(kind, &id),
            })
            .await?;

            for rel in &model.has_many {
                self.exec(Delete {
                    key: self.keys.children(kind, &id, &rel.target),
                })
                .await?;
            }
        }

        record.mark_deleted();
        Ok(())
    }
}
