use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Get {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub key: String,
    pub value: String,
}

/// Removes the key from every keyspace. Deleting a missing key succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub key: String,
}

impl From<Get> for Operation {
    fn from(value: Get) -> Self {
        Self::Get(value)
    }
}

impl From<Set> for Operation {
    fn from(value: Set) -> Self {
        Self::Set(value)
    }
}

impl From<Delete> for Operation {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
