mod adhoc;
mod driver_operation_failed;
mod invalid_connection_url;
mod invalid_index_definition;
mod invalid_result;
mod state_conflict;
mod unsupported_context;

use adhoc::AdhocError;
use driver_operation_failed::DriverOperationFailed;
use invalid_connection_url::InvalidConnectionUrl;
use invalid_index_definition::InvalidIndexDefinition;
use invalid_result::InvalidResult;
use state_conflict::StateConflict;
use std::sync::Arc;
use unsupported_context::UnsupportedContext;

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

/// An error raised while planning or executing an index directive.
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
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => {
                    assert!(
                        inner.cause.is_none(),
                        "consequent error must not already have a cause"
                    );
                    inner.kind
                }
                Err(shared) => {
                    ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string().into_boxed_str()))
                }
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// Returns the innermost error of the context chain.
    pub fn root(&self) -> &Error {
        self.chain().last().unwrap_or(self)
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    /// Creates an ad-hoc error from pre-formatted arguments. Prefer the
    /// [`err!`] and [`bail!`] macros.
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        let message = match args.as_str() {
            Some(message) => Box::from(message),
            None => args.to_string().into_boxed_str(),
        };
        Error::from(ErrorKind::Adhoc(AdhocError::new(message)))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::DriverOperationFailed(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    DriverOperationFailed(DriverOperationFailed),
    InvalidConnectionUrl(InvalidConnectionUrl),
    InvalidIndexDefinition(InvalidIndexDefinition),
    InvalidResult(InvalidResult),
    StateConflict(StateConflict),
    UnsupportedContext(UnsupportedContext),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            DriverOperationFailed(err) => core::fmt::Display::fmt(err, f),
            InvalidConnectionUrl(err) => core::fmt::Display::fmt(err, f),
            InvalidIndexDefinition(err) => core::fmt::Display::fmt(err, f),
            InvalidResult(err) => core::fmt::Display::fmt(err, f),
            StateConflict(err) => core::fmt::Display::fmt(err, f),
            UnsupportedContext(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown safer-index error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct ConnectionReset;

    impl std::error::Error for ConnectionReset {}

    impl core::fmt::Display for ConnectionReset {
        fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
            f.write_str("connection reset by peer")
        }
    }

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = err!("root cause");
        let chained = root
            .context(err!("middle context"))
            .context(err!("top context"));

        assert_eq!(
            chained.to_string(),
            "top context: middle context: root cause"
        );
        assert_eq!(chained.root().to_string(), "root cause");
    }

    #[test]
    fn context_keeps_root_kind_queryable() {
        let err = Error::unsupported_context("concurrent index build")
            .context(err!("AddIndexConcurrently(int_field_idx)"));

        assert!(!err.is_unsupported_context());
        assert!(err.root().is_unsupported_context());
    }

    #[test]
    fn anyhow_bridge() {
        let our_err: Error = anyhow::anyhow!("something failed").into();
        assert_eq!(our_err.to_string(), "something failed");
    }

    #[test]
    fn std_error_bridge() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let our_err: Error = io_err.into();
        assert!(our_err.to_string().contains("file not found"));
    }

    #[test]
    fn driver_operation_failed_exposes_source() {
        use std::error::Error as _;

        let err = Error::driver_operation_failed(ConnectionReset);
        assert!(err.is_driver_operation_failed());
        assert_eq!(err.to_string(), "connection reset by peer");
        assert!(err.source().is_some());
    }

    #[test]
    fn unsupported_context_message() {
        let err = Error::unsupported_context("concurrent index build");
        assert_eq!(
            err.to_string(),
            "concurrent index build is not supported inside a transaction"
        );
    }

    #[test]
    fn state_conflict_message() {
        let err = Error::state_conflict("index `int_field_idx` already exists on model `intmodel`");
        assert!(err.is_state_conflict());
        assert_eq!(
            err.to_string(),
            "logical state conflict: index `int_field_idx` already exists on model `intmodel`"
        );
    }

    #[test]
    fn invalid_index_definition_message() {
        let err = Error::invalid_index_definition("index name must not be empty");
        assert!(err.is_invalid_index_definition());
        assert_eq!(
            err.to_string(),
            "invalid index definition: index name must not be empty"
        );
    }

    #[test]
    fn invalid_result_message() {
        let err = Error::invalid_result("`SHOW lock_timeout` returned no rows");
        assert!(err.is_invalid_result());
        assert_eq!(
            err.to_string(),
            "invalid result: `SHOW lock_timeout` returned no rows"
        );
    }
}
