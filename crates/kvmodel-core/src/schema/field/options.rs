use super::{AutoStrategy, FieldTy};
use crate::schema::Validator;

/// Declarative options for one field, passed to
/// [`ModelBuilder::field`](crate::schema::ModelBuilder::field).
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    pub(crate) ty: FieldTy,
    pub(crate) required: bool,
    pub(crate) updatable: bool,
    pub(crate) indexed: bool,
    pub(crate) unique: bool,
    pub(crate) validator: Option<Validator>,
    pub(crate) default: Option<serde_json::Value>,
    pub(crate) nullify_if_blank: bool,
    pub(crate) auto: Option<AutoStrategy>,
}

impl FieldOptions {
    /// Options for a plain string field.
    pub fn new() -> FieldOptions {
        <FieldOptions as Default>::default()
    }

    pub fn of(ty: FieldTy) -> FieldOptions {
        FieldOptions::new().ty(ty)
    }

    pub fn ty(mut self, ty: FieldTy) -> Self {
        self.ty = ty;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn updatable(mut self) -> Self {
        self.updatable = true;
        self
    }

    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Values must be unique across records. Implies `indexed`.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self.indexed = true;
        self
    }

    /// Replaces the validator, including the one `email` and `phone`
    /// fields get by default.
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Json only: value used when the field is unset or fails to parse.
    pub fn default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    /// String only: blank input becomes null instead of `""`.
    pub fn nullify_if_blank(mut self) -> Self {
        self.nullify_if_blank = true;
        self
    }

    pub fn auto(mut self, auto: AutoStrategy) -> Self {
        self.auto = Some(auto);
        self
    }
}
