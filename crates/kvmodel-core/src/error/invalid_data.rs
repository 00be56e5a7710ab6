use super::Error;

use indexmap::IndexMap;
use std::fmt;

/// Why a field failed schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    /// The field is required but blank (or a non-positive integer).
    Missing,

    /// The field's validator rejected the value.
    Invalid,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Missing => "missing",
            Reason::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when one or more fields fail schema validation.
#[derive(Debug)]
pub(super) struct InvalidDataError {
    fields: IndexMap<String, Reason>,
}

impl std::error::Error for InvalidDataError {}

impl fmt::Display for InvalidDataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid data: ")?;
        for (i, (name, reason)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={reason}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates an invalid data error from `(field, reason)` pairs.
    pub fn invalid_data<K: Into<String>>(fields: impl IntoIterator<Item = (K, Reason)>) -> Error {
        Error::from(super::ErrorKind::InvalidData(InvalidDataError {
            fields: fields
                .into_iter()
                .map(|(name, reason)| (name.into(), reason))
                .collect(),
        }))
    }

    /// Returns `true` if this error is an invalid data error.
    pub fn is_invalid_data(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::InvalidData(_))
    }

    /// Returns the failing fields and their reasons, in schema order.
    pub fn invalid_fields(&self) -> Option<&IndexMap<String, Reason>> {
        match self.root_kind() {
            super::ErrorKind::InvalidData(err) => Some(&err.fields),
            _ => None,
        }
    }
}
