use super::*;

/// Responds with `Bool(true)` if the member was not already present.
#[derive(Debug, Clone, PartialEq)]
pub struct SetAdd {
    pub key: String,
    pub member: String,
}

/// Responds with `Bool(true)` if the member was present.
#[derive(Debug, Clone, PartialEq)]
pub struct SetRemove {
    pub key: String,
    pub member: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetIsMember {
    pub key: String,
    pub member: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetMembers {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetCardinality {
    pub key: String,
}

impl From<SetAdd> for Operation {
    fn from(value: SetAdd) -> Self {
        Self::SetAdd(value)
    }
}

impl From<SetRemove> for Operation {
    fn from(value: SetRemove) -> Self {
        Self::SetRemove(value)
    }
}

impl From<SetIsMember> for Operation {
    fn from(value: SetIsMember) -> Self {
        Self::SetIsMember(value)
    }
}

impl From<SetMembers> for Operation {
    fn from(value: SetMembers) -> Self {
        Self::SetMembers(value)
    }
}

impl From<SetCardinality> for Operation {
    fn from(value: SetCardinality) -> Self {
        Self::SetCardinality(value)
    }
}
