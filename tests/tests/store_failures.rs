use kvmodel::{
    driver::{operation::HashGetAll, Capability, Driver, Operation, Response},
    Result,
};
use kvmodel_driver_memory::Memory;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};
use tests::prelude::*;

/// Memory store that fails one chosen operation on one key.
#[derive(Debug, Default)]
struct Flaky {
    inner: Memory,
    fail: Arc<Mutex<Option<(&'static str, String)>>>,
}

#[async_trait::async_trait]
impl Driver for Flaky {
    fn capability(&self) -> &'static Capability {
        self.inner.capability()
    }

    async fn exec(&self, op: Operation) -> Result<Response> {
        let fails = match &*self.fail.lock().unwrap() {
            Some((name, key)) => op.name() == *name && op.key() == key.as_str(),
            None => false,
        };

        if fails {
            let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "store unavailable");
            return Err(Error::driver(io));
        }

        self.inner.exec(op).await
    }

    async fn reset_db(&self) -> Result<()> {
        self.inner.reset_db().await
    }
}

type FailSwitch = Arc<Mutex<Option<(&'static str, String)>>>;

async fn setup() -> (Db, FailSwitch) {
    let driver = Flaky::default();
    let fail = driver.fail.clone();

    let db = models!(Account, Project).build(driver).await.unwrap();
    (db, fail)
}

fn account(id: &str, email: &str) -> Fields {
    fields! {
        "id" => id,
        "email" => email,
        "first_name" => "Sami",
        "last_name" => "Samhuri",
        "hashed_password" => "secret-hash",
    }
}

#[tokio::test]
async fn failed_record_write_releases_unique_claims() {
    let (db, fail) = setup().await;
    let accounts = db.collection::<Account>().unwrap();

    *fail.lock().unwrap() = Some(("hash_set", "account:acct-1".to_string()));

    let err = assert_err!(accounts.create(account("acct-1", "sami@example.com")).await);
    assert!(err.is_driver());
    assert!(!accounts.is_taken("email", "sami@example.com").await.unwrap());
    assert_eq!(0, accounts.count().await.unwrap());

    *fail.lock().unwrap() = None;

    let record = accounts
        .create(account("acct-2", "sami@example.com"))
        .await
        .unwrap();
    assert_eq!(
        record.id().map(str::to_string),
        accounts.id_for("email", "sami@example.com").await.unwrap()
    );
}

#[tokio::test]
async fn failed_id_set_write_leaves_no_record() {
    let (db, fail) = setup().await;
    let accounts = db.collection::<Account>().unwrap();

    *fail.lock().unwrap() = Some(("set_add", "account-ids".to_string()));

    let err = assert_err!(accounts.create(account("acct-1", "sami@example.com")).await);
    assert!(err.is_driver());
    assert!(!accounts.is_taken("email", "sami@example.com").await.unwrap());

    let hash = db
        .driver()
        .exec(HashGetAll { key: "account:acct-1".into() }.into())
        .await
        .unwrap()
        .into_hash()
        .unwrap();
    assert_empty!(hash);
}

#[tokio::test]
async fn failed_save_keeps_the_old_unique_value() {
    let (db, fail) = setup().await;
    let accounts = db.collection::<Account>().unwrap();

    let mut record = accounts
        .create(account("acct-1", "old@example.com"))
        .await
        .unwrap();

    *fail.lock().unwrap() = Some(("hash_set", "account:acct-1".to_string()));

    let err = assert_err!(db.update_field(&mut record, "email", "new@example.com").await);
    assert!(err.is_driver());
    assert_eq!(Some("old@example.com"), record.get_str("email"));

    assert!(!accounts.is_taken("email", "new@example.com").await.unwrap());
    assert_eq!(
        Some("acct-1".to_string()),
        accounts.id_for("email", "old@example.com").await.unwrap()
    );

    *fail.lock().unwrap() = None;
    db.update_field(&mut record, "email", "new@example.com").await.unwrap();
    assert!(!accounts.is_taken("email", "old@example.com").await.unwrap());
}
