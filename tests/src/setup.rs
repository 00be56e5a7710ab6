use kvmodel::driver::{Capability, Driver};

/// One store driver the integration tests run against.
pub trait Setup: Send + Sync + 'static {
    /// Opens a fresh, empty store.
    fn driver(&self) -> kvmodel::Result<Box<dyn Driver>>;

    fn capability(&self) -> &'static Capability;

    /// URL that `Db::builder().connect()` accepts for this driver.
    fn url(&self) -> &'static str;
}
