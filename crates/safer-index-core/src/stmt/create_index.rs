use super::{Name, Statement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIndex {
    /// Name of the index
    pub name: Name,

    /// Which table to index
    pub on: Name,

    /// The key columns or expressions, in index order
    pub columns: Vec<IndexColumn>,

    /// Non-key columns stored in the index (`INCLUDE (...)`)
    pub include: Vec<Name>,

    /// When true, the index is unique
    pub unique: bool,

    /// Build without blocking writes (`CONCURRENTLY`)
    pub concurrently: bool,

    /// Skip the statement when an index with this name already exists
    pub if_not_exists: bool,

    /// Partial index predicate, emitted verbatim after `WHERE`
    pub predicate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexColumn {
    /// A table column, optionally with an explicit sort direction
    Column {
        name: Name,
        direction: Option<Direction>,
    },

    /// An SQL expression, emitted verbatim inside parentheses
    Expr(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

impl CreateIndex {
    /// A `CREATE INDEX CONCURRENTLY IF NOT EXISTS` statement with no
    /// columns yet.
    pub fn concurrently(name: impl Into<Name>, on: impl Into<Name>) -> Self {
        CreateIndex {
            name: name.into(),
            on: on.into(),
            columns: vec![],
            include: vec![],
            unique: false,
            concurrently: true,
            if_not_exists: true,
            predicate: None,
        }
    }
}

impl IndexColumn {
    pub fn column(name: impl Into<Name>) -> Self {
        IndexColumn::Column {
            name: name.into(),
            direction: None,
        }
    }
}

impl Statement {
    pub fn create_index(stmt: CreateIndex) -> Self {
        stmt.into()
    }
}

impl From<CreateIndex> for Statement {
    fn from(value: CreateIndex) -> Self {
        Self::CreateIndex(value)
    }
}
