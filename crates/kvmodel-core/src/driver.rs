mod capability;
pub use capability::Capability;

mod response;
pub use response::Response;

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, Result};

use std::fmt::Debug;

/// A key-value store the mapper persists records into.
///
/// Drivers expose only primitive operations: string get/set/delete, field
/// maps (hashes) and sets. Every mapper operation is a sequence of these.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Describes the driver's capability, which informs the engine's
    /// uniqueness protocol.
    fn capability(&self) -> &'static Capability;

    /// Execute a store operation
    async fn exec(&self, op: Operation) -> Result<Response>;

    /// Remove every key from the store. Used by tests.
    async fn reset_db(&self) -> Result<()>;
}

#[async_trait]
impl<T: Driver + ?Sized> Driver for Box<T> {
    fn capability(&self) -> &'static Capability {
        (**self).capability()
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        (**self).exec(op).await
    }

    async fn reset_db(&self) -> Result<()> {
        (**self).reset_db().await
    }
}
