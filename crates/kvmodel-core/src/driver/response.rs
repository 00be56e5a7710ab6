use crate::{Error, Result};

use indexmap::IndexMap;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The operation completed and returns nothing.
    Unit,

    /// A single string value, `None` if the key or field does not exist.
    Value(Option<String>),

    /// Every field of a hash. Empty if the key does not exist.
    Hash(IndexMap<String, String>),

    /// Every member of a set. Empty if the key does not exist.
    Members(BTreeSet<String>),

    /// Outcome of a conditional write or membership test.
    Bool(bool),

    /// Number of items, e.g. set cardinality.
    Count(u64),
}

impl Response {
    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }

    pub fn into_value(self) -> Result<Option<String>> {
        match self {
            Self::Value(value) => Ok(value),
            other => Err(unexpected("Value", &other)),
        }
    }

    pub fn into_hash(self) -> Result<IndexMap<String, String>> {
        match self {
            Self::Hash(hash) => Ok(hash),
            other => Err(unexpected("Hash", &other)),
        }
    }

    pub fn into_members(self) -> Result<BTreeSet<String>> {
        match self {
            Self::Members(members) => Ok(members),
            other => Err(unexpected("Members", &other)),
        }
    }

    pub fn into_bool(self) -> Result<bool> {
        match self {
            Self::Bool(b) => Ok(b),
            other => Err(unexpected("Bool", &other)),
        }
    }

    pub fn into_count(self) -> Result<u64> {
        match self {
            Self::Count(count) => Ok(count),
            other => Err(unexpected("Count", &other)),
        }
    }
}

fn unexpected(expected: &str, actual: &Response) -> Error {
    Error::invalid_result(format!("expected {expected}, got {actual:?}"))
}
