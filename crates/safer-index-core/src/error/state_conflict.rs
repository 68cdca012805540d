use super::Error;

/// Error when a directive does not fit the logical schema state.
///
/// This occurs when:
/// - An index is added under a name the model already has
/// - An index is removed that the model does not have
/// - The directive references a model, or an index references a field, that
///   the logical state does not know about
///
/// These are framework-level conflicts raised while planning; they are never
/// caused by the database.
#[derive(Debug)]
pub(super) struct StateConflict {
    message: Box<str>,
}

impl std::error::Error for StateConflict {}

impl core::fmt::Display for StateConflict {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "logical state conflict: {}", self.message)
    }
}

impl Error {
    /// Creates a logical state conflict error.
    pub fn state_conflict(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::StateConflict(StateConflict {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a logical state conflict.
    pub fn is_state_conflict(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::StateConflict(_))
    }
}
