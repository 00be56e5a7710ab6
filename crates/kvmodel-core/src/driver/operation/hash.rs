use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct HashGet {
    pub key: String,
    pub field: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashGetAll {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashSet {
    pub key: String,

    /// Field/value pairs, written in order
    pub pairs: Vec<(String, String)>,
}

/// Responds with `Bool(true)` when the field was written and `Bool(false)`
/// when it already existed.
#[derive(Debug, Clone, PartialEq)]
pub struct HashSetIfAbsent {
    pub key: String,
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashDelete {
    pub key: String,
    pub field: String,
}

impl From<HashGet> for Operation {
    fn from(value: HashGet) -> Self {
        Self::HashGet(value)
    }
}

impl From<HashGetAll> for Operation {
    fn from(value: HashGetAll) -> Self {
        Self::HashGetAll(value)
    }
}

impl From<HashSet> for Operation {
    fn from(value: HashSet) -> Self {
        Self::HashSet(value)
    }
}

impl From<HashSetIfAbsent> for Operation {
    fn from(value: HashSetIfAbsent) -> Self {
        Self::HashSetIfAbsent(value)
    }
}

impl From<HashDelete> for Operation {
    fn from(value: HashDelete) -> Self {
        Self::HashDelete(value)
    }
}
