use crate::{driver::Driver, Error, Result};

use std::sync::Arc;
use url::Url;

/// Opens the driver a connection URL names.
///
/// * `memory:` keeps everything in process
/// * `sqlite::memory:` or `sqlite:<path>` uses SQLite
pub(super) fn connect(url: &str) -> Result<Arc<dyn Driver>> {
    let parsed = Url::parse(url)
        .map_err(|err| Error::invalid_connection_url(format!("{url}: {err}")))?;

    match parsed.scheme() {
        "memory" => connect_memory(&parsed),
        "sqlite" => connect_sqlite(&parsed),
        scheme => Err(Error::invalid_connection_url(format!(
            "unsupported store; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "memory")]
fn connect_memory(_url: &Url) -> Result<Arc<dyn Driver>> {
    Ok(Arc::new(kvmodel_driver_memory::Memory::new()))
}

#[cfg(not(feature = "memory"))]
fn connect_memory(_url: &Url) -> Result<Arc<dyn Driver>> {
    Err(Error::invalid_connection_url("`memory` feature not enabled"))
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &Url) -> Result<Arc<dyn Driver>> {
    Ok(Arc::new(kvmodel_driver_sqlite::Sqlite::connect(url.as_str())?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &Url) -> Result<Arc<dyn Driver>> {
    Err(Error::invalid_connection_url("`sqlite` feature not enabled"))
}
