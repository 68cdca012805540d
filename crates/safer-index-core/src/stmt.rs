mod create_index;
pub use create_index::{CreateIndex, Direction, IndexColumn};

mod drop_index;
pub use drop_index::DropIndex;

mod find_invalid_index;
pub use find_invalid_index::FindInvalidIndex;

mod name;
pub use name::Name;

mod setting;
pub use setting::{SetSetting, SettingValue, ShowSetting};

/// Session setting that bounds how long a statement waits for a lock.
pub const LOCK_TIMEOUT: &str = "lock_timeout";

/// A statement issued by an index directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    CreateIndex(CreateIndex),
    DropIndex(DropIndex),
    FindInvalidIndex(FindInvalidIndex),
    SetSetting(SetSetting),
    ShowSetting(ShowSetting),
}

impl Statement {
    /// Returns `true` when executing the statement yields rows.
    pub fn returns_rows(&self) -> bool {
        matches!(
            self,
            Statement::FindInvalidIndex(_) | Statement::ShowSetting(_)
        )
    }

    /// Returns `true` for statements that build or drop an index without
    /// holding an exclusive lock on the table.
    pub fn is_concurrent_ddl(&self) -> bool {
        match self {
            Statement::CreateIndex(stmt) => stmt.concurrently,
            Statement::DropIndex(stmt) => stmt.concurrently,
            _ => false,
        }
    }
}
