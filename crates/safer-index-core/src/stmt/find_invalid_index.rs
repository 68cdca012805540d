use super::Statement;

/// Catalog lookup for an index with the given name whose build did not
/// complete (`pg_index.indisvalid = false`).
///
/// Returns one row per matching index. The name is bound as a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindInvalidIndex {
    /// Name of the index to look for
    pub name: String,
}

impl Statement {
    pub fn find_invalid_index(name: impl Into<String>) -> Self {
        FindInvalidIndex { name: name.into() }.into()
    }
}

impl From<FindInvalidIndex> for Statement {
    fn from(value: FindInvalidIndex) -> Self {
        Self::FindInvalidIndex(value)
    }
}
