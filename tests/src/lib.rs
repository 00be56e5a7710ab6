#[macro_use]
mod macros;


pub use db_test::DbTest;

mod exec_log;
pub use exec_log::ExecLog;


pub use logging_driver::{DriverOp, LoggingDriver};

pub mod models;


mod setup;
pub use setup::Setup;

pub use std_util::*;
