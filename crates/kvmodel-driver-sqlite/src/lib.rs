mod exec;

use kvmodel_core::{
    async_trait,
    driver::{Capability, Driver, Operation, Response},
    err, Error, Result,
};
use rusqlite::Connection;
use std::{
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};
use tracing::{debug, trace};
use url::Url;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS kv_string (
        key   TEXT NOT NULL PRIMARY KEY,
        value TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS kv_hash (
        key   TEXT NOT NULL,
        field TEXT NOT NULL,
        value TEXT NOT NULL,
        PRIMARY KEY (key, field)
    );
    CREATE TABLE IF NOT EXISTS kv_set (
        key    TEXT NOT NULL,
        member TEXT NOT NULL,
        PRIMARY KEY (key, member)
    );
";

/// A store kept in three SQLite tables: plain values, hash fields and set
/// members.
#[derive(Debug)]
pub struct Sqlite {
    location: Location,
    connection: Mutex<Connection>,
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Opens the database a `sqlite:` URL names. `sqlite::memory:` opens a
    /// private in-memory database.
    pub fn connect(url: &str) -> Result<Sqlite> {
        let parsed = Url::parse(url)
            .map_err(|err| Error::invalid_connection_url(format!("{url}: {err}")))?;

        if parsed.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url}"
            )));
        }

        match parsed.path() {
            ":memory:" => Sqlite::in_memory(),
            "" => Err(Error::invalid_connection_url(format!(
                "connection URL has no database path; url={url}"
            ))),
            path => Sqlite::open(path),
        }
    }

    pub fn in_memory() -> Result<Sqlite> {
        let connection = Connection::open_in_memory().map_err(Error::driver)?;
        Sqlite::init(Location::InMemory, connection)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Sqlite> {
        let path = path.as_ref().to_path_buf();
        let connection = Connection::open(&path).map_err(Error::driver)?;
        Sqlite::init(Location::File(path), connection)
    }

    /// The URL this database can be reopened with.
    pub fn url(&self) -> String {
        match &self.location {
            Location::InMemory => "sqlite::memory:".to_string(),
            Location::File(path) => format!("sqlite:{}", path.display()),
        }
    }

    fn init(location: Location, connection: Connection) -> Result<Sqlite> {
        connection.execute_batch(SCHEMA).map_err(Error::driver)?;
        debug!(?location, "sqlite store ready");

        Ok(Sqlite {
            location,
            connection: Mutex::new(connection),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| err!("sqlite connection lock poisoned"))
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        trace!(op = op.name(), key = op.key(), "sqlite exec");

        let mut connection = self.lock()?;
        exec::apply(&mut connection, op).map_err(Error::driver)
    }

    async fn reset_db(&self) -> Result<()> {
        let connection = self.lock()?;
        connection
            .execute_batch("DELETE FROM kv_string; DELETE FROM kv_hash; DELETE FROM kv_set;")
            .map_err(Error::driver)
    }
}
