use super::{Result, Schema};
use crate::Error;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        self.verify_belongs_to_targets()?;
        self.verify_has_many_pairs()?;
        Ok(())
    }

    fn verify_belongs_to_targets(&self) -> Result<()> {
        for model in self.schema.models() {
            for belongs_to in &model.belongs_to {
                if self.schema.model(&belongs_to.target).is_none() {
                    return Err(Error::invalid_schema(format!(
                        "`{}` belongs to `{}`, which is not registered",
                        model.name, belongs_to.target
                    )));
                }
            }
        }

        Ok(())
    }

    fn verify_has_many_pairs(&self) -> Result<()> {
        for model in self.schema.models() {
            for has_many in &model.has_many {
                let Some(child) = self.schema.model(&has_many.target) else {
                    return Err(Error::invalid_schema(format!(
                        "`{}` has many `{}`, which is not registered",
                        model.name, has_many.target
                    )));
                };

                if child.belongs_to(&model.name).is_none() {
                    return Err(Error::invalid_schema(format!(
                        "`{}` must belong to `{}` to pair with its has_many",
                        child.name, model.name
                    )));
                }
            }
        }

        Ok(())
    }
}
