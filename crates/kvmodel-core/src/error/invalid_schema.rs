use super::Error;

/// Error when a schema definition is invalid.
///
/// This occurs when:
/// - A field is declared with an unknown type name
/// - A model has duplicate field names or no `id` field
/// - An option is used on a field type it does not apply to
/// - A relation references a model that was not registered, or a `has_many`
///   has no matching `belongs_to` on the child
///
/// These errors are caught while the schema is built, before any store access.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::InvalidSchema(_))
    }
}
