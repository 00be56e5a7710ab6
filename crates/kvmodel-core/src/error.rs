mod adhoc;
mod driver;
mod duplicate_field;
mod invalid_connection_url;
mod invalid_data;
mod invalid_result;
mod invalid_schema;
mod invalid_state;
mod record_not_found;
mod unknown_field;

use adhoc::AdhocError;
use driver::DriverError;
use duplicate_field::DuplicateFieldError;
use invalid_connection_url::InvalidConnectionUrl;
use invalid_data::InvalidDataError;
pub use invalid_data::Reason;
use invalid_result::InvalidResult;
use invalid_schema::InvalidSchema;
use invalid_state::InvalidStateError;
use record_not_found::RecordNotFoundError;
use std::{fmt, sync::Arc};
use unknown_field::UnknownFieldError;

/// Returns early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// The error type of every fallible kvmodel operation.
///
/// One pointer wide. An error may wrap a cause, forming a chain that is
/// rendered outermost first.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Wraps this error in `outer`, which is rendered before it.
    #[inline(always)]
    pub fn context(self, outer: impl IntoError) -> Error {
        self.wrap(outer.into_error())
    }

    #[inline(never)]
    #[cold]
    fn wrap(self, outer: Error) -> Error {
        let kind = outer.inner.map_or(ErrorKind::Unknown, |inner| {
            Arc::try_unwrap(inner).map_or_else(
                |shared| ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
                |inner| inner.kind,
            )
        });

        Error::from(ErrorInner {
            kind,
            cause: Some(self),
        })
    }

    /// This error followed by each of its causes.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |err| {
            err.inner.as_ref().and_then(|inner| inner.cause.as_ref())
        })
    }

    fn kind(&self) -> &ErrorKind {
        match &self.inner {
            Some(inner) => &inner.kind,
            None => &ErrorKind::Unknown,
        }
    }

    /// Kind of the innermost cause. Predicates look through added context.
    fn root_kind(&self) -> &ErrorKind {
        self.chain().last().unwrap_or(self).kind()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Driver(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, err) in self.chain().enumerate() {
            if i > 0 {
                f.write_str(": ")?;
            }
            fmt::Display::fmt(err.kind(), f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.inner, f.alternate()) {
            (Some(inner), true) => f
                .debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish(),
            _ => fmt::Display::fmt(self, f),
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Driver(DriverError),
    DuplicateField(DuplicateFieldError),
    InvalidConnectionUrl(InvalidConnectionUrl),
    InvalidData(InvalidDataError),
    InvalidResult(InvalidResult),
    InvalidSchema(InvalidSchema),
    InvalidState(InvalidStateError),
    RecordNotFound(RecordNotFoundError),
    UnknownField(UnknownFieldError),
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let err: &dyn fmt::Display = match self {
            ErrorKind::Anyhow(err) => err,
            ErrorKind::Adhoc(err) => err,
            ErrorKind::Driver(err) => err,
            ErrorKind::DuplicateField(err) => err,
            ErrorKind::InvalidConnectionUrl(err) => err,
            ErrorKind::InvalidData(err) => err,
            ErrorKind::InvalidResult(err) => err,
            ErrorKind::InvalidSchema(err) => err,
            ErrorKind::InvalidState(err) => err,
            ErrorKind::RecordNotFound(err) => err,
            ErrorKind::UnknownField(err) => err,
            ErrorKind::Unknown => return f.write_str("unknown kvmodel error"),
        };
        fmt::Display::fmt(err, f)
    }
}

impl From<ErrorInner> for Error {
    fn from(inner: ErrorInner) -> Error {
        Error {
            inner: Some(Arc::new(inner)),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::from(ErrorInner { kind, cause: None })
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Anything usable as context for an [`Error`].
pub trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    fn into_error(self) -> Error {
        self
    }
}
