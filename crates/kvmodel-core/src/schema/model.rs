use super::{AutoStrategy, BelongsTo, BelongsToOptions, Field, FieldOptions, FieldTy, HasMany};
use crate::{Error, Result};

use indexmap::IndexMap;

/// The schema of one entity kind.
#[derive(Debug, Clone)]
pub struct Model {
    /// Model name, used in every store key of the kind
    pub name: String,

    /// Fields in declaration order, including `belongs_to` foreign keys
    pub fields: IndexMap<String, Field>,

    pub belongs_to: Vec<BelongsTo>,

    pub has_many: Vec<HasMany>,
}

/// Collects a model definition. Nothing is checked until
/// [`ModelBuilder::build`].
#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    fields: Vec<(String, FieldOptions)>,
    belongs_to: Vec<BelongsTo>,
    has_many: Vec<HasMany>,
}

impl Model {
    /// Name of the identity field every model defines.
    pub const ID: &'static str = "id";

    /// Name no model may take; its keys would alias index hashes.
    pub const RESERVED_NAME: &'static str = "index";

    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            name: name.into(),
            fields: vec![],
            belongs_to: vec![],
            has_many: vec![],
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Like [`Model::field`], failing with `unknown_field` for names the
    /// model does not define.
    pub fn expect_field(&self, name: &str) -> Result<&Field> {
        self.field(name)
            .ok_or_else(|| Error::unknown_field(&self.name, name))
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn indexed_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields().filter(|field| field.indexed)
    }

    pub fn belongs_to(&self, parent: &str) -> Option<&BelongsTo> {
        self.belongs_to.iter().find(|rel| rel.target == parent)
    }

    pub fn has_many(&self, child: &str) -> Option<&HasMany> {
        self.has_many.iter().find(|rel| rel.target == child)
    }
}

impl ModelBuilder {
    /// Declares a field. A name ending in `?` declares a boolean field
    /// named without the marker.
    pub fn field(mut self, name: impl Into<String>, mut options: FieldOptions) -> Self {
        let mut name = name.into();

        if let Some(stripped) = name.strip_suffix('?') {
            name = stripped.to_string();
            options.ty = FieldTy::Boolean;
        }

        self.fields.push((name, options));
        self
    }

    /// Links this model to a parent, adding the `<parent>_id` field.
    pub fn belongs_to(mut self, parent: impl Into<String>, options: BelongsToOptions) -> Self {
        let relation = BelongsTo::new(&parent.into());

        let mut fk = FieldOptions::new();
        fk.required = options.required;
        fk.updatable = options.updatable;

        self.fields.push((relation.foreign_key.clone(), fk));
        self.belongs_to.push(relation);
        self
    }

    pub fn has_many(mut self, child: impl Into<String>) -> Self {
        self.has_many.push(HasMany {
            target: child.into(),
        });
        self
    }

    pub fn build(self) -> Result<Model> {
        let name = self.name;

        if name.is_empty() || name.contains(':') {
            return Err(Error::invalid_schema(format!("invalid model name `{name}`")));
        }

        // Index hashes live under `index:`
        if name == Model::RESERVED_NAME {
            return Err(Error::invalid_schema(format!(
                "model name `{name}` is reserved"
            )));
        }

        let mut fields = IndexMap::with_capacity(self.fields.len());

        for (field_name, mut options) in self.fields {
            verify_options(&name, &field_name, &options)?;

            if field_name == Model::ID && !options.ty.is_string() {
                return Err(Error::invalid_schema(format!(
                    "{name}.id: ids are strings, not {}",
                    options.ty
                )));
            }

            if field_name == Model::ID && options.required && options.auto.is_none() {
                options.auto = Some(AutoStrategy::Uuid);
            }

            if fields.contains_key(&field_name) {
                return Err(Error::invalid_schema(format!(
                    "field `{field_name}` is defined twice on `{name}`"
                )));
            }

            let field = Field::new(field_name.clone(), options);
            fields.insert(field_name, field);
        }

        if !fields.contains_key(Model::ID) {
            return Err(Error::invalid_schema(format!(
                "model `{name}` has no `id` field"
            )));
        }

        for (i, rel) in self.belongs_to.iter().enumerate() {
            if self.belongs_to[..i].iter().any(|prev| prev.target == rel.target) {
                return Err(Error::invalid_schema(format!(
                    "`{name}` belongs to `{}` twice",
                    rel.target
                )));
            }
        }

        for (i, rel) in self.has_many.iter().enumerate() {
            if self.has_many[..i].iter().any(|prev| prev.target == rel.target) {
                return Err(Error::invalid_schema(format!(
                    "`{name}` has many `{}` twice",
                    rel.target
                )));
            }
        }

        Ok(Model {
            name,
            fields,
            belongs_to: self.belongs_to,
            has_many: self.has_many,
        })
    }
}

fn verify_options(model: &str, field: &str, options: &FieldOptions) -> Result<()> {
    let ty = options.ty;

    let misuse = if field.is_empty() {
        Some("a field name cannot be empty".to_string())
    } else if options.nullify_if_blank && !ty.is_string() {
        Some(format!("`nullify_if_blank` does not apply to {ty} fields"))
    } else if options.default.is_some() && !ty.is_json() {
        Some(format!("`default` does not apply to {ty} fields"))
    } else {
        match options.auto {
            Some(AutoStrategy::Uuid) if !ty.is_string() => {
                Some(format!("uuid ids require a string field, not {ty}"))
            }
            Some(auto) if auto.is_timestamp() && !ty.is_integer() => {
                Some(format!("timestamps require an integer field, not {ty}"))
            }
            _ => None,
        }
    };

    match misuse {
        Some(message) => Err(Error::invalid_schema(format!(
            "{model}.{field}: {message}"
        ))),
        None => Ok(()),
    }
}
