use crate::{
    driver::operation::{HashDelete, HashGet, HashSet, HashSetIfAbsent},
    engine::Engine,
    schema::Field,
    Error, Result, Value,
};

use tracing::warn;

/// How unique index entries are reserved when a record is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UniquenessPolicy {
    /// Look the value up, then claim its index entry with an atomic
    /// set-if-absent before the record is written. A claim lost to a
    /// concurrent writer is rolled back and reported as a duplicate.
    #[default]
    Claim,

    /// Look the value up, then write the index entry unconditionally.
    /// Concurrent writers of the same value can both succeed.
    CheckThenSet,
}

/// A pending change to one field's index entry.
#[derive(Debug)]
pub(crate) struct IndexChange<'a> {
    pub(crate) field: &'a Field,

    /// Normalized value currently indexed, if any
    pub(crate) old: Option<String>,

    /// Normalized value to index, if any
    pub(crate) new: Option<String>,

    /// The value being written, as given to the record
    pub(crate) value: Value,
}

impl<'a> IndexChange<'a> {
    /// Returns `None` when the normalized value does not change, e.g. for a
    /// pure case change.
    pub(crate) fn between(field: &'a Field, old: Option<&Value>, new: &Value) -> Option<Self> {
        let old = old.and_then(Value::index_key);
        let new_key = new.index_key();

        if old == new_key {
            return None;
        }

        Some(IndexChange {
            field,
            old,
            new: new_key,
            value: new.clone(),
        })
    }

    fn is_claimed(&self, policy: UniquenessPolicy) -> bool {
        policy == UniquenessPolicy::Claim && self.field.unique && self.new.is_some()
    }
}

/// A unique index entry written for a record that is not stored yet.
#[derive(Debug)]
pub(crate) struct Claim {
    field: String,
    key: String,
}

impl Engine {
    /// Looks up the id a normalized value maps to.
    pub(crate) async fn index_lookup(&self, kind: &str, field: &str, key: &str) -> Result<Option<String>> {
        self.exec(HashGet {
            key: self.keys.index(kind, field),
            field: key.to_string(),
        })
        .await?
        .into_value()
    }

    /// Looks up the id a value maps to in a field's index. Blank values are
    /// never indexed.
    pub(crate) async fn id_for(&self, kind: &str, field: &Field, value: &Value) -> Result<Option<String>> {
        match value.index_key() {
            Some(key) => self.index_lookup(kind, &field.name, &key).await,
            None => Ok(None),
        }
    }

    /// Fails with `DuplicateField` if a unique value in `changes` maps to a
    /// record other than `id`. Read only.
    pub(crate) async fn check_unique(&self, kind: &str, id: &str, changes: &[IndexChange<'_>]) -> Result<()> {
        for change in changes.iter().filter(|change| change.field.unique) {
            let Some(key) = &change.new else { continue };

            match self.index_lookup(kind, &change.field.name, key).await? {
                Some(holder) if holder != id => {
                    return Err(Error::duplicate_field(
                        &change.field.name,
                        change.value.to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Claims the index entries of unique values for `id`, returning the
    /// entries this call wrote. When a claim is lost, every claim made so far
    /// is released.
    pub(crate) async fn claim_unique(&self, kind: &str, id: &str, changes: &[IndexChange<'_>]) -> Result<Vec<Claim>> {
        let mut claims = vec![];

        for change in changes.iter().filter(|change| change.is_claimed(self.uniqueness)) {
            let Some(key) = &change.new else { continue };

            let written = self
                .exec(HashSetIfAbsent {
                    key: self.keys.index(kind, &change.field.name),
                    field: key.clone(),
                    value: id.to_string(),
                })
                .await?
                .into_bool()?;

            if written {
                claims.push(Claim {
                    field: change.field.name.clone(),
                    key: key.clone(),
                });
                continue;
            }

            let holder = self.index_lookup(kind, &change.field.name, key).await?;
            if holder.as_deref() == Some(id) {
                continue;
            }

            warn!(
                kind,
                id,
                field = %change.field.name,
                "unique index claim lost to a concurrent writer; rolling back"
            );
            self.release_claims(kind, id, &claims).await;

            return Err(Error::duplicate_field(
                &change.field.name,
                change.value.to_string(),
            ));
        }

        Ok(claims)
    }

    /// Removes entries written by [`Engine::claim_unique`]. Best effort: a
    /// failure is logged and the remaining claims are still released.
    pub(crate) async fn release_claims(&self, kind: &str, id: &str, claims: &[Claim]) {
        for claim in claims {
            if let Err(err) = self.remove_index_entry(kind, &claim.field, &claim.key, id).await {
                warn!(kind, id, field = %claim.field, %err, "failed to release unique index claim");
            }
        }
    }

    /// Removes the old entry of every change.
    pub(crate) async fn unindex(&self, kind: &str, id: &str, changes: &[IndexChange<'_>]) -> Result<()> {
        for change in changes {
            if let Some(key) = &change.old {
                self.remove_index_entry(kind, &change.field.name, key, id).await?;
            }
        }

        Ok(())
    }

    /// Writes the new entry of every change not already claimed.
    pub(crate) async fn index(&self, kind: &str, id: &str, changes: &[IndexChange<'_>]) -> Result<()> {
        let pairs = changes
            .iter()
            .filter(|change| !change.is_claimed(self.uniqueness))
            .filter_map(|change| Some((change, change.new.clone()?)));

        for (change, key) in pairs {
            self.exec(HashSet {
                key: self.keys.index(kind, &change.field.name),
                pairs: vec![(key, id.to_string())],
            })
            .await?;
        }

        Ok(())
    }

    /// Deletes an index entry, but only while it still maps to `id`.
    pub(crate) async fn remove_index_entry(&self, kind: &str, field: &str, key: &str, id: &str) -> Result<()> {
        let holder = self.index_lookup(kind, field, key).await?;

        if holder.as_deref() == Some(id) {
            self.exec(HashDelete {
                key: self.keys.index(kind, field),
                field: key.to_string(),
            })
            .await?;
        }

        Ok(())
    }
}
