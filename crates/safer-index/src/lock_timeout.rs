use crate::{sequence::execute, Result};

use safer_index_core::{driver::Connection, stmt::Statement, Error};

/// The session's `lock_timeout`, captured before a concurrent index build or
/// drop disables it.
///
/// A snapshot must be handed back through [`restore`] or [`restore_after`].
/// Dropping one that was never restored logs a warning naming the value the
/// session was left without.
///
/// [`restore`]: LockTimeoutSnapshot::restore
/// [`restore_after`]: LockTimeoutSnapshot::restore_after
#[must_use = "the captured lock_timeout must be restored"]
#[derive(Debug)]
pub struct LockTimeoutSnapshot {
    original: String,
    database: String,
    restored: bool,
}

impl LockTimeoutSnapshot {
    /// Reads the current value with `SHOW lock_timeout`.
    pub async fn capture(conn: &mut dyn Connection) -> Result<Self> {
        let rows = execute(conn, Statement::show_lock_timeout())
            .await?
            .rows
            .into_values()?;

        let original = rows
            .first()
            .and_then(|row| row.get(0))
            .ok_or_else(|| Error::invalid_result("`SHOW lock_timeout` returned no value"))?;

        Ok(Self {
            original: original.to_string(),
            database: conn.database().to_string(),
            restored: false,
        })
    }

    /// The value read when the snapshot was taken, e.g. `"1s"` or `"0"`.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// `SET lock_timeout = 0` for the rest of the sequence.
    pub async fn disable(&self, conn: &mut dyn Connection) -> Result<()> {
        execute(conn, Statement::disable_lock_timeout()).await?;
        Ok(())
    }

    /// Puts the captured value back.
    pub async fn restore(mut self, conn: &mut dyn Connection) -> Result<()> {
        // Attempted once, whatever the outcome
        self.restored = true;
        execute(conn, Statement::set_lock_timeout(self.original.clone())).await?;
        Ok(())
    }

    /// Restores the captured value once `outcome` is known.
    ///
    /// The restore runs whether or not `outcome` is an error. When both fail,
    /// the error of `outcome` is returned and the restore failure is logged.
    pub async fn restore_after<T>(
        self,
        conn: &mut dyn Connection,
        outcome: Result<T>,
    ) -> Result<T> {
        let original = self.original.clone();
        let restored = self.restore(conn).await;

        match (outcome, restored) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(restore_err)) => {
                tracing::warn!(
                    db = %conn.database(),
                    lock_timeout = %original,
                    error = %restore_err,
                    "failed to restore lock_timeout after a failed statement"
                );
                Err(err)
            }
        }
    }
}

impl Drop for LockTimeoutSnapshot {
    fn drop(&mut self) {
        if !self.restored {
            tracing::warn!(
                db = %self.database,
                lock_timeout = %self.original,
                "lock_timeout snapshot dropped without being restored; the session keeps lock_timeout = 0"
            );
        }
    }
}
