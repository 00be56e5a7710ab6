use std::sync::Arc;

/// Builds every store key the mapper uses, under an optional prefix.
#[derive(Debug, Clone, Default)]
pub struct KeySpace {
    prefix: Arc<str>,
}

impl KeySpace {
    pub fn new(prefix: &str) -> KeySpace {
        KeySpace {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Hash holding a record's fields
    pub fn record(&self, kind: &str, id: &str) -> String {
        format!("{}{kind}:{id}", self.prefix)
    }

    /// Set of every persisted id of a kind
    pub fn model_ids(&self, kind: &str) -> String {
        format!("{}{kind}-ids", self.prefix)
    }

    /// Hash mapping normalized values of an indexed field to ids
    pub fn index(&self, kind: &str, field: &str) -> String {
        format!("{}index:{kind}-{field}", self.prefix)
    }

    /// Set of child ids owned by one parent record
    pub fn children(&self, parent_kind: &str, parent_id: &str, child_kind: &str) -> String {
        format!("{}:{child_kind}-ids", self.record(parent_kind, parent_id))
    }
}
