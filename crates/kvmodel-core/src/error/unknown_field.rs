use super::Error;

/// Error when a field map names a field the model does not define.
#[derive(Debug)]
pub(super) struct UnknownFieldError {
    model: Box<str>,
    field: Box<str>,
}

impl std::error::Error for UnknownFieldError {}

impl core::fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unknown field `{}` for model `{}`",
            self.field, self.model
        )
    }
}

impl Error {
    pub fn unknown_field(model: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownField(UnknownFieldError {
            model: model.into().into(),
            field: field.into().into(),
        }))
    }

    pub fn is_unknown_field(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::UnknownField(_))
    }
}
