use super::{Name, Statement};

/// A statement to drop an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIndex {
    /// Name of the index.
    pub name: Name,

    /// Whether or not to add a `CONCURRENTLY` clause.
    pub concurrently: bool,

    /// Whether or not to add an `IF EXISTS` clause.
    pub if_exists: bool,
}

impl Statement {
    /// `DROP INDEX CONCURRENTLY IF EXISTS "<name>"`
    ///
    /// Works the same whether the index is valid or invalid, and is a no-op
    /// when it is absent.
    pub fn drop_index_concurrently(name: impl Into<Name>) -> Self {
        DropIndex {
            name: name.into(),
            concurrently: true,
            if_exists: true,
        }
        .into()
    }
}

impl From<DropIndex> for Statement {
    fn from(value: DropIndex) -> Self {
        Self::DropIndex(value)
    }
}
