use super::Error;

/// Error when an operation is not allowed in the record's lifecycle state,
/// e.g. saving a record that was never created or was already deleted.
#[derive(Debug)]
pub(super) struct InvalidStateError {
    message: Box<str>,
}

impl std::error::Error for InvalidStateError {}

impl core::fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid record state: {}", self.message)
    }
}

impl Error {
    pub fn invalid_state(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidState(InvalidStateError {
            message: message.into().into(),
        }))
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::InvalidState(_))
    }
}
