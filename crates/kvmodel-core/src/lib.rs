#[macro_use]
mod macros;

pub mod driver;
pub use driver::Driver;

mod error;
pub use error::{Error, IntoError, Reason};

pub mod schema;
pub use schema::Schema;

pub mod value;
pub use value::{Fields, Value};

/// A Result type alias that uses kvmodel's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
