mod store;
use store::Store;

use kvmodel_core::{
    async_trait,
    driver::{Capability, Driver, Operation, Response},
    err, Result,
};
use std::sync::Mutex;
use tracing::trace;

/// A store held entirely in process memory. Data lives as long as the
/// driver.
#[derive(Debug, Default)]
pub struct Memory {
    store: Mutex<Store>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }
}

#[async_trait]
impl Driver for Memory {
    fn capability(&self) -> &'static Capability {
        &Capability::MEMORY
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        trace!(op = op.name(), key = op.key(), "memory exec");

        let mut store = self
            .store
            .lock()
            .map_err(|_| err!("memory store lock poisoned"))?;

        Ok(store.apply(op))
    }

    async fn reset_db(&self) -> Result<()> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| err!("memory store lock poisoned"))?;

        *store = Store::default();
        Ok(())
    }
}
