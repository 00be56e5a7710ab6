use kvmodel::schema::{FieldOptions, FieldTy, Model};

pub struct Admin;

impl kvmodel::Model for Admin {
    const NAME: &'static str = "admin";

    fn schema() -> kvmodel::Result<Model> {
        Model::builder(Self::NAME)
            .field("id", FieldOptions::new().required())
            .field("name", FieldOptions::new().required().updatable())
            .field("email", FieldOptions::of(FieldTy::Email).required().unique())
            .field("hashed_password", FieldOptions::new().required())
            .build()
    }
}
