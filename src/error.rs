//! Unified error type.

use std::fmt;

/// The error type returned by stitch's fallible operations.
///
/// Configuration mistakes surface from [`Runner::build`](crate::Runner::build)
/// wrapped in [`Error::InvalidOption`]. Failures inside a request belong to
/// the middleware or handler that raised them and never become an `Error`.
#[derive(Debug)]
pub enum Error {
    /// An option was given an absent middleware.
    NilMiddleware,
    /// An option was given an absent terminal handler.
    NilHandler,
    /// A setter passed to `Runner::build` rejected its input.
    InvalidOption(Box<Error>),
    /// Binding the listener failed.
    Io(std::io::Error),
}

impl Error {
    /// Reports whether `self` is, or wraps, an error of the same kind as
    /// `other`.
    ///
    /// ```rust
    /// use stitch::{Error, Runner, use_handler};
    ///
    /// let err = Runner::build([use_handler(None)]).unwrap_err();
    /// assert!(err.contains(&Error::NilHandler));
    /// ```
    pub fn contains(&self, other: &Error) -> bool {
        self.same(other) || matches!(self, Self::InvalidOption(inner) if inner.contains(other))
    }

    /// Same kind, and for wrapped errors the same wrapped error all the way
    /// down. `Io` errors compare by [`std::io::ErrorKind`].
    fn same(&self, other: &Error) -> bool {
        match (self, other) {
            (Self::InvalidOption(a), Self::InvalidOption(b)) => a.same(b),
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NilMiddleware => f.write_str("middleware is nil"),
            Self::NilHandler => f.write_str("handler is nil"),
            Self::InvalidOption(inner) => write!(f, "invalid option: {inner}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidOption(inner) => Some(inner.as_ref()),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
