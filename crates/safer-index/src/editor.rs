use crate::{
    router::{Hints, Routers},
    Result,
};

use safer_index_core::{
    driver::{operation::Transaction, Connection},
    Error,
};

/// The per-run handle directives execute through.
///
/// Wraps one connection and the router chain. An *atomic* editor wraps the
/// whole run in a transaction, which concurrent index directives refuse to
/// run in.
#[derive(Debug)]
pub struct SchemaEditor<'a> {
    conn: &'a mut dyn Connection,
    routers: &'a Routers,
    atomic: bool,
}

impl<'a> SchemaEditor<'a> {
    /// A non-atomic editor: every statement commits on its own.
    pub fn new(conn: &'a mut dyn Connection, routers: &'a Routers) -> Self {
        Self {
            conn,
            routers,
            atomic: false,
        }
    }

    /// Opens a transaction and returns an editor that runs inside it.
    pub async fn atomic(conn: &'a mut dyn Connection, routers: &'a Routers) -> Result<Self> {
        conn.exec(Transaction::Start.into()).await?;

        Ok(Self {
            conn,
            routers,
            atomic: true,
        })
    }

    pub fn is_atomic(&self) -> bool {
        self.atomic
    }

    /// Alias of the database behind the connection.
    pub fn database(&self) -> &str {
        self.conn.database()
    }

    pub fn connection(&mut self) -> &mut dyn Connection {
        &mut *self.conn
    }

    /// Fails with [`Error::unsupported_context`] when statements issued
    /// through this editor would run inside a transaction block.
    pub fn ensure_not_in_transaction(&self, operation: &str) -> Result<()> {
        if self.atomic || self.conn.in_transaction() {
            return Err(Error::unsupported_context(operation));
        }
        Ok(())
    }

    pub(crate) fn allow_migrate(&self, app_label: &str, hints: &Hints<'_>) -> bool {
        self.routers
            .allow_migrate(self.conn.database(), app_label, hints)
    }

    /// Commits the transaction of an atomic editor. No-op otherwise.
    pub async fn commit(self) -> Result<()> {
        if self.atomic {
            self.conn.exec(Transaction::Commit.into()).await?;
        }
        Ok(())
    }

    /// Rolls back the transaction of an atomic editor. No-op otherwise.
    pub async fn rollback(self) -> Result<()> {
        if self.atomic {
            self.conn.exec(Transaction::Rollback.into()).await?;
        }
        Ok(())
    }
}
