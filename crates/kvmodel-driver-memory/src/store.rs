use kvmodel_core::driver::{Operation, Response};

use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap};

/// The three keyspaces of the store. A key lives in at most one of them.
#[derive(Debug, Default)]
pub(crate) struct Store {
    strings: HashMap<String, String>,
    hashes: HashMap<String, IndexMap<String, String>>,
    sets: HashMap<String, BTreeSet<String>>,
}

impl Store {
    pub(crate) fn apply(&mut self, op: Operation) -> Response {
        match op {
            Operation::Get(op) => Response::Value(self.strings.get(&op.key).cloned()),
            Operation::Set(op) => {
                self.strings.insert(op.key, op.value);
                Response::Unit
            }
            Operation::Delete(op) => {
                self.strings.remove(&op.key);
                self.hashes.remove(&op.key);
                self.sets.remove(&op.key);
                Response::Unit
            }
            Operation::HashGet(op) => Response::Value(
                self.hashes
                    .get(&op.key)
                    .and_then(|hash| hash.get(&op.field))
                    .cloned(),
            ),
            Operation::HashGetAll(op) => {
                Response::Hash(self.hashes.get(&op.key).cloned().unwrap_or_default())
            }
            Operation::HashSet(op) => {
                let hash = self.hashes.entry(op.key).or_default();
                hash.extend(op.pairs);
                Response::Unit
            }
            Operation::HashSetIfAbsent(op) => {
                let hash = self.hashes.entry(op.key).or_default();
                let written = !hash.contains_key(&op.field);
                if written {
                    hash.insert(op.field, op.value);
                }
                Response::Bool(written)
            }
            Operation::HashDelete(op) => {
                if let Some(hash) = self.hashes.get_mut(&op.key) {
                    hash.shift_remove(&op.field);
                    if hash.is_empty() {
                        self.hashes.remove(&op.key);
                    }
                }
                Response::Unit
            }
            Operation::SetAdd(op) => {
                Response::Bool(self.sets.entry(op.key).or_default().insert(op.member))
            }
            Operation::SetRemove(op) => {
                let Some(set) = self.sets.get_mut(&op.key) else {
                    return Response::Bool(false);
                };
                let removed = set.remove(&op.member);
                if set.is_empty() {
                    self.sets.remove(&op.key);
                }
                Response::Bool(removed)
            }
            Operation::SetIsMember(op) => Response::Bool(
                self.sets
                    .get(&op.key)
                    .is_some_and(|set| set.contains(&op.member)),
            ),
            Operation::SetMembers(op) => {
                Response::Members(self.sets.get(&op.key).cloned().unwrap_or_default())
            }
            Operation::SetCardinality(op) => {
                Response::Count(self.sets.get(&op.key).map_or(0, |set| set.len() as u64))
            }
        }
    }
}
