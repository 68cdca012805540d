use super::Error;

/// Error when an index definition is rejected at construction time.
///
/// This occurs when:
/// - The index name is empty, longer than PostgreSQL's identifier limit, or
///   contains a NUL byte
/// - The index has neither fields nor expressions
/// - Fields and expressions are mixed in a single index
///
/// An index that passes validation is safe to interpolate as a quoted
/// identifier.
#[derive(Debug)]
pub(super) struct InvalidIndexDefinition {
    message: Box<str>,
}

impl std::error::Error for InvalidIndexDefinition {}

impl core::fmt::Display for InvalidIndexDefinition {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid index definition: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid index definition error.
    pub fn invalid_index_definition(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidIndexDefinition(
            InvalidIndexDefinition {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an invalid index definition error.
    pub fn is_invalid_index_definition(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidIndexDefinition(_))
    }
}
