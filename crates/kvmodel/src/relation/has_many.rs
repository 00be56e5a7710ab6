use crate::{
    driver::operation::{SetAdd, SetCardinality, SetMembers, SetRemove},
    engine::Engine,
    schema::Model,
    Record, Result,
};

use std::sync::Arc;

/// The child ids one parent record owns.
#[derive(Debug, Clone)]
pub struct HasMany<'a> {
    engine: &'a Engine,
    child: Arc<Model>,
    key: String,
}

impl<'a> HasMany<'a> {
    pub(crate) fn new(engine: &'a Engine, child: Arc<Model>, key: String) -> HasMany<'a> {
        HasMany { engine, child, key }
    }

    /// Child ids, sorted.
    pub async fn ids(&self) -> Result<Vec<String>> {
        let members = self
            .engine
            .exec(SetMembers {
                key: self.key.clone(),
            })
            .await?
            .into_members()?;

        Ok(members.into_iter().collect())
    }

    /// Returns true if the id was not already linked.
    pub async fn add_id(&self, id: &str) -> Result<bool> {
        self.engine
            .exec(SetAdd {
                key: self.key.clone(),
                member: id.to_string(),
            })
            .await?
            .into_bool()
    }

    /// Returns true if the id was linked.
    pub async fn remove_id(&self, id: &str) -> Result<bool> {
        self.engine
            .exec(SetRemove {
                key: self.key.clone(),
                member: id.to_string(),
            })
            .await?
            .into_bool()
    }

    pub async fn count(&self) -> Result<u64> {
        self.engine
            .exec(SetCardinality {
                key: self.key.clone(),
            })
            .await?
            .into_count()
    }

    /// Fetches every child. Ids whose record no longer exists are skipped.
    pub async fn all(&self) -> Result<Vec<Record>> {
        let mut records = vec![];

        for id in self.ids().await? {
            if let Some(record) = self.engine.fetch(&self.child, &id).await? {
                records.push(record);
            }
        }

        Ok(records)
    }
}
