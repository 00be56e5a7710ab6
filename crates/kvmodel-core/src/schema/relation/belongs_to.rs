/// The child side of a one-to-many link.
#[derive(Debug, Clone)]
pub struct BelongsTo {
    /// Name of the parent model
    pub target: String,

    /// Field on this model holding the parent's id, `<target>_id`
    pub foreign_key: String,
}

impl BelongsTo {
    pub(crate) fn new(target: &str) -> BelongsTo {
        BelongsTo {
            target: target.to_string(),
            foreign_key: format!("{target}_id"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BelongsToOptions {
    pub(crate) required: bool,
    pub(crate) updatable: bool,
}

impl BelongsToOptions {
    pub fn new() -> BelongsToOptions {
        BelongsToOptions::default()
    }

    /// The foreign key must be set
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// A plain `update` may move the record to another parent
    pub fn updatable(mut self) -> Self {
        self.updatable = true;
        self
    }
}
