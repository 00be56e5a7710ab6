mod hash;
pub use hash::{HashDelete, HashGet, HashGetAll, HashSet, HashSetIfAbsent};

mod set;
pub use set::{SetAdd, SetCardinality, SetIsMember, SetMembers, SetRemove};

mod string;
pub use string::{Delete, Get, Set};

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Read a string value
    Get(Get),

    /// Write a string value
    Set(Set),

    /// Remove a key, whatever it holds
    Delete(Delete),

    /// Read one field of a hash
    HashGet(HashGet),

    /// Read every field of a hash
    HashGetAll(HashGetAll),

    /// Write one or more hash fields
    HashSet(HashSet),

    /// Write a hash field only if it does not exist yet
    HashSetIfAbsent(HashSetIfAbsent),

    /// Remove one hash field
    HashDelete(HashDelete),

    /// Add a member to a set
    SetAdd(SetAdd),

    /// Remove a member from a set
    SetRemove(SetRemove),

    /// Test set membership
    SetIsMember(SetIsMember),

    /// Read every member of a set
    SetMembers(SetMembers),

    /// Count the members of a set
    SetCardinality(SetCardinality),
}

impl Operation {
    /// The store key this operation touches.
    pub fn key(&self) -> &str {
        match self {
            Self::Get(op) => &op.key,
            Self::Set(op) => &op.key,
            Self::Delete(op) => &op.key,
            Self::HashGet(op) => &op.key,
            Self::HashGetAll(op) => &op.key,
            Self::HashSet(op) => &op.key,
            Self::HashSetIfAbsent(op) => &op.key,
            Self::HashDelete(op) => &op.key,
            Self::SetAdd(op) => &op.key,
            Self::SetRemove(op) => &op.key,
            Self::SetIsMember(op) => &op.key,
            Self::SetMembers(op) => &op.key,
            Self::SetCardinality(op) => &op.key,
        }
    }

    /// True if the operation can modify the store.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Self::Set(_)
                | Self::Delete(_)
                | Self::HashSet(_)
                | Self::HashSetIfAbsent(_)
                | Self::HashDelete(_)
                | Self::SetAdd(_)
                | Self::SetRemove(_)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Get(_) => "get",
            Self::Set(_) => "set",
            Self::Delete(_) => "delete",
            Self::HashGet(_) => "hash_get",
            Self::HashGetAll(_) => "hash_get_all",
            Self::HashSet(_) => "hash_set",
            Self::HashSetIfAbsent(_) => "hash_set_if_absent",
            Self::HashDelete(_) => "hash_delete",
            Self::SetAdd(_) => "set_add",
            Self::SetRemove(_) => "set_remove",
            Self::SetIsMember(_) => "set_is_member",
            Self::SetMembers(_) => "set_members",
            Self::SetCardinality(_) => "set_cardinality",
        }
    }
}
