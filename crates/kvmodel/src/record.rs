use crate::{schema::Model, Error, Reason, Result, Value};

use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;

/// Where a record is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Built in memory, not yet created
    Unpersisted,

    /// Backed by a hash in the store
    Persisted,

    /// Deleted. Terminal.
    Deleted,
}

/// One in-memory instance of an entity kind.
///
/// A record holds the coerced value of every field in its model and tracks
/// which fields changed since the last persisted state.
#[derive(Debug, Clone)]
pub struct Record {
    model: Arc<Model>,

    /// Identity the record is stored under, once created
    id: Option<String>,

    values: IndexMap<String, Value>,

    dirty: IndexSet<String>,

    /// Values as of the last load or successful write
    persisted: IndexMap<String, Value>,

    state: RecordState,
}

impl Record {
    /// A new, unpersisted record. Every field holds its initial value and
    /// is dirty.
    pub fn new(model: Arc<Model>) -> Record {
        let values: IndexMap<_, _> = model
            .fields()
            .map(|field| (field.name.clone(), field.initial()))
            .collect();
        let dirty = values.keys().cloned().collect();

        Record {
            model,
            id: None,
            values,
            dirty,
            persisted: IndexMap::new(),
            state: RecordState::Unpersisted,
        }
    }

    /// Rebuilds a persisted record from its stored hash. Fields missing from
    /// the hash take their initial value; unknown stored fields are ignored.
    pub(crate) fn load(model: Arc<Model>, id: String, hash: IndexMap<String, String>) -> Record {
        let values: IndexMap<_, _> = model
            .fields()
            .map(|field| {
                let value = match hash.get(&field.name) {
                    Some(raw) => field.from_storage(raw),
                    None => field.initial(),
                };
                (field.name.clone(), value)
            })
            .collect();

        Record {
            model,
            id: Some(id),
            persisted: values.clone(),
            values,
            dirty: IndexSet::new(),
            state: RecordState::Persisted,
        }
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    pub fn kind(&self) -> &str {
        &self.model.name
    }

    /// The stored identity, or the current `id` value before the record is
    /// created.
    pub fn id(&self) -> Option<&str> {
        match &self.id {
            Some(id) => Some(id),
            None => self
                .get_str(Model::ID)
                .filter(|id| !id.trim().is_empty()),
        }
    }

    pub fn state(&self) -> RecordState {
        self.state
    }

    pub fn is_persisted(&self) -> bool {
        self.state == RecordState::Persisted
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_json(&self, name: &str) -> Option<&serde_json::Value> {
        self.get(name).and_then(Value::as_json)
    }

    /// Mutable access to a json field. Json fields are written on every
    /// save, so in-place edits need no dirty marking.
    pub fn get_json_mut(&mut self, name: &str) -> Option<&mut serde_json::Value> {
        self.values.get_mut(name).and_then(Value::as_json_mut)
    }

    /// Boolean predicate: true only for a boolean field holding `true`.
    pub fn is(&self, name: &str) -> bool {
        self.get_bool(name).unwrap_or(false)
    }

    /// All current values, in field declaration order.
    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    /// Coerces `raw` through the field's schema, stores it and marks the
    /// field dirty.
    ///
    /// On a persisted record, setting a field back to its persisted value
    /// clears its dirty mark.
    pub fn set(&mut self, name: &str, raw: impl Into<Value>) -> Result<()> {
        let field = self.model.expect_field(name)?;
        let value = field.coerce(raw.into());

        if self.state == RecordState::Persisted && self.persisted.get(name) == Some(&value) {
            self.dirty.shift_remove(name);
        } else {
            self.dirty.insert(name.to_string());
        }

        self.values.insert(name.to_string(), value);
        Ok(())
    }

    pub fn dirty_fields(&self) -> impl Iterator<Item = &str> {
        self.dirty.iter().map(String::as_str)
    }

    pub fn is_dirty(&self, name: &str) -> bool {
        self.dirty.contains(name)
    }

    /// The field/value pairs the next save writes: dirty fields plus every
    /// json field, in storage form.
    pub fn snapshot_for_persist(&self) -> IndexMap<String, String> {
        self.model
            .fields()
            .filter(|field| field.ty.is_json() || self.dirty.contains(&field.name))
            .map(|field| {
                let value = self.values.get(&field.name).cloned().unwrap_or_default();
                (field.name.clone(), value.to_storage())
            })
            .collect()
    }

    /// Checks every validating field, collecting failures in field order.
    pub fn validate(&self) -> Result<()> {
        let invalid: Vec<(String, Reason)> = self
            .model
            .fields()
            .filter(|field| field.validates())
            .filter_map(|field| {
                let value = self.values.get(&field.name)?;
                field.validate(value).map(|reason| (field.name.clone(), reason))
            })
            .collect();

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_data(invalid))
        }
    }

    /// Checks a single field.
    pub fn validate_field(&self, name: &str) -> Result<()> {
        let field = self.model.expect_field(name)?;
        let value = self.values.get(name).cloned().unwrap_or_default();

        match field.validate(&value) {
            Some(reason) => Err(Error::invalid_data([(name, reason)])),
            None => Ok(()),
        }
    }

    /// The value of `name` as of the last load or write.
    pub(crate) fn persisted_value(&self, name: &str) -> Option<&Value> {
        self.persisted.get(name)
    }

    /// Stores an already coerced value and marks it dirty. Used for
    /// automatic fields.
    pub(crate) fn set_coerced(&mut self, name: &str, value: Value) {
        self.dirty.insert(name.to_string());
        self.values.insert(name.to_string(), value);
    }

    /// Records a successful write: the record is persisted under `id` and
    /// nothing is dirty.
    pub(crate) fn mark_persisted(&mut self, id: String) {
        self.id = Some(id);
        self.state = RecordState::Persisted;
        self.dirty.clear();
        self.persisted = self.values.clone();
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.state = RecordState::Deleted;
        self.dirty.clear();
    }
}
