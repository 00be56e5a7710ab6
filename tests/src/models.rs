//! Models shared by the integration tests.

pub use account::Account;

mod admin;
pub use admin::Admin;

pub use person::Person;

pub use project::Project;
