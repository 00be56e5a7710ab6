use super::Error;

/// Error when a unique field's candidate value collides with an existing
/// record.
#[derive(Debug)]
pub(super) struct DuplicateFieldError {
    field: Box<str>,
    value: Box<str>,
}

impl std::error::Error for DuplicateFieldError {}

impl core::fmt::Display for DuplicateFieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "duplicate field: {}={:?}", self.field, self.value)
    }
}

impl Error {
    /// Creates a duplicate field error.
    ///
    /// `value` is the candidate value as the caller supplied it, not its
    /// normalized index key.
    pub fn duplicate_field(field: impl Into<String>, value: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateField(DuplicateFieldError {
            field: field.into().into(),
            value: value.into().into(),
        }))
    }

    /// Returns `true` if this error is a duplicate field error.
    pub fn is_duplicate_field(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::DuplicateField(_))
    }

    /// Returns the colliding field and value.
    pub fn duplicated_field(&self) -> Option<(&str, &str)> {
        match self.root_kind() {
            super::ErrorKind::DuplicateField(err) => Some((&err.field, &err.value)),
            _ => None,
        }
    }
}
