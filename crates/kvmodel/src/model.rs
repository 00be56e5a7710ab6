use crate::{schema, Result};

/// An entity kind declared in code.
///
/// ```
/// use kvmodel::schema::{FieldOptions, FieldTy};
///
/// struct Tag;
///
/// impl kvmodel::Model for Tag {
///     const NAME: &'static str = "tag";
///
///     fn schema() -> kvmodel::Result<kvmodel::schema::Model> {
///         kvmodel::schema::Model::builder(Self::NAME)
///             .field("id", FieldOptions::new().required())
///             .field("label", FieldOptions::of(FieldTy::String).unique())
///             .build()
///     }
/// }
/// ```
pub trait Model {
    /// Model name, as used in store keys
    const NAME: &'static str;

    fn schema() -> Result<schema::Model>;
}
