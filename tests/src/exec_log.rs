use crate::logging_driver::DriverOp;
use kvmodel::driver::Operation;
use std::sync::{Arc, Mutex};

/// A view of the operations a test's `Db` sent to the store
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Check if any operation matches the given predicate
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Operation) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .any(|op| predicate(&op.operation))
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Operation) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| predicate(&op.operation))
            .count()
    }

    /// Number of operations that can modify the store
    pub fn writes(&self) -> usize {
        self.count(Operation::is_write)
    }

    /// Check if any operation wrote to `key`
    pub fn wrote(&self, key: &str) -> bool {
        self.any(|op| op.is_write() && op.key() == key)
    }

    pub fn has_hash_delete(&self) -> bool {
        self.any(|op| matches!(op, Operation::HashDelete(_)))
    }

    /// Clear the log
    pub fn clear(&mut self) {
        self.ops.lock().unwrap().clear();
    }

    /// All logged operations, oldest first
    pub fn operations(&self) -> Vec<Operation> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.operation.clone())
            .collect()
    }
}
