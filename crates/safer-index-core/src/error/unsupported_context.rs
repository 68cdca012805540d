use super::Error;

/// Error when a directive is executed inside a transaction block.
///
/// Concurrent index builds and drops cannot run inside a transaction, so the
/// directive refuses to start and issues no SQL at all.
#[derive(Debug)]
pub(super) struct UnsupportedContext {
    operation: Box<str>,
}

impl std::error::Error for UnsupportedContext {}

impl core::fmt::Display for UnsupportedContext {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{} is not supported inside a transaction",
            self.operation
        )
    }
}

impl Error {
    /// Creates an unsupported context error for the named operation.
    pub fn unsupported_context(operation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedContext(UnsupportedContext {
            operation: operation.into().into(),
        }))
    }

    /// Returns `true` if this error was raised because the operation ran
    /// inside a transaction.
    pub fn is_unsupported_context(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedContext(_))
    }
}
