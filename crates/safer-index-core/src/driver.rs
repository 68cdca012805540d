pub mod operation;
pub use operation::Operation;

mod response;
pub use response::{Response, Row, Rows};

use crate::async_trait;

use std::fmt::Debug;

/// A single database session.
///
/// Directives run every statement of one execution sequence on the same
/// connection, so session-level settings such as `lock_timeout` apply to all
/// of them.
#[async_trait]
pub trait Connection: Debug + Send {
    /// Alias of the database this connection talks to. Routers receive this
    /// value when deciding whether a migration may run here.
    fn database(&self) -> &str;

    /// Returns `true` while the session is inside a transaction block.
    fn in_transaction(&self) -> bool;

    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> crate::Result<Response>;
}
