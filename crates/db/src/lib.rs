// SPDX-License-Identifier: MIT

//! Transactional storage backing every garcia store
//!
//! A thin layer over `redb` (with `bincode` encoded keys and values),
//! that runs transactions on the calling thread via
//! [`tokio::task::block_in_place`] and supports post-commit hooks.
//!
//! Note: a multi-threaded tokio runtime is required.
pub mod ctx;
pub mod error;

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use ctx::WriteTransactionCtx;
use error::{
    CommitSnafu, DatabaseSnafu, DbError, DbResult, DbTxError, DbTxResult, InvalidPathSnafu,
    JoinSnafu, TransactionSnafu,
};
use garcia_util_error::fmt::FmtCompact as _;
use redb_bincode::{ReadTransaction, redb};
use snafu::{OptionExt as _, ResultExt as _};
use tracing::{debug, instrument, warn};

const LOG_TARGET: &str = "garcia::db";

#[derive(Debug)]
pub struct Database {
    inner: redb_bincode::Database,
    commit_hook_order_lock: Arc<Mutex<()>>,
    ephemeral: bool,
}

impl Database {
    pub async fn new_in_memory() -> DbResult<Database> {
        debug!(target: LOG_TARGET, "Opening in-memory database");
        let inner = redb::Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .context(DatabaseSnafu)?;
        Ok(Self::from_redb(inner, true))
    }

    pub async fn open(path: impl Into<PathBuf>) -> DbResult<Database> {
        let path = path.into();
        tokio::fs::create_dir_all(path.parent().context(InvalidPathSnafu)?).await?;
        debug!(target: LOG_TARGET, path = %path.display(), "Opening database…");

        let inner = tokio::task::spawn_blocking(move || {
            let mut db = redb::Database::create(path)?;
            let _ = db.compact().inspect_err(|err| {
                warn!(target: LOG_TARGET, err = %err.fmt_compact(), "Failed to compact database");
            });
            Ok(db)
        })
        .await
        .context(JoinSnafu)?
        .context(DatabaseSnafu)?;

        Ok(Self::from_redb(inner, false))
    }

    #[instrument(skip_all)]
    fn from_redb(inner: redb::Database, ephemeral: bool) -> Database {
        Self {
            inner: redb_bincode::Database::from(inner),
            commit_hook_order_lock: Arc::new(Mutex::new(())),
            ephemeral,
        }
    }

    /// Is this an in-memory database, lost on drop
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    fn write_with_inner<T, E>(
        &self,
        f: impl FnOnce(&'_ WriteTransactionCtx) -> DbTxResult<T, E>,
    ) -> DbTxResult<T, E>
    where
        E: snafu::Error + 'static,
    {
        tokio::task::block_in_place(|| {
            let dbtx = WriteTransactionCtx::new(
                self.inner.begin_write().context(TransactionSnafu)?,
                self.commit_hook_order_lock.clone(),
            );
            // On error `dbtx` is dropped, which aborts the transaction
            let res = f(&dbtx)?;
            dbtx.commit().context(CommitSnafu)?;

            Ok(res)
        })
    }

    fn read_with_inner<T, E>(
        &self,
        f: impl FnOnce(&'_ ReadTransaction) -> DbTxResult<T, E>,
    ) -> DbTxResult<T, E>
    where
        E: snafu::Error + 'static,
    {
        tokio::task::block_in_place(|| {
            let dbtx = self.inner.begin_read().context(TransactionSnafu)?;
            f(&dbtx)
        })
    }

    pub async fn write_with<T>(
        &self,
        f: impl FnOnce(&'_ WriteTransactionCtx) -> DbResult<T>,
    ) -> DbResult<T> {
        self.write_with_inner::<T, Infallible>(|dbtx| Ok(f(dbtx)?))
            .map_err(DbError::from)
    }

    /// Do a writeable database transaction that can fail for logical reasons
    ///
    /// Internal database errors cause a panic, errors of `f` are returned.
    pub async fn write_with_expect_falliable<T, E>(
        &self,
        f: impl FnOnce(&'_ WriteTransactionCtx) -> DbTxResult<T, E>,
    ) -> Result<T, E>
    where
        E: snafu::Error + 'static,
    {
        expect_db(self.write_with_inner(f))
    }

    /// Do a writeable database transaction and panic on internal db errors
    ///
    /// If the handler `f` can fail for logical reasons, use
    /// [`Self::write_with_expect_falliable`]
    pub async fn write_with_expect<T>(
        &self,
        f: impl FnOnce(&'_ WriteTransactionCtx) -> DbResult<T>,
    ) -> T {
        self.write_with(f).await.expect("Fatal database error")
    }

    pub async fn read_with<T>(
        &self,
        f: impl FnOnce(&'_ ReadTransaction) -> DbResult<T>,
    ) -> DbResult<T> {
        self.read_with_inner::<T, Infallible>(|dbtx| Ok(f(dbtx)?))
            .map_err(DbError::from)
    }

    pub async fn read_with_expect_falliable<T, E>(
        &self,
        f: impl FnOnce(&'_ ReadTransaction) -> DbTxResult<T, E>,
    ) -> Result<T, E>
    where
        E: snafu::Error + 'static,
    {
        expect_db(self.read_with_inner(f))
    }

    pub async fn read_with_expect<T>(
        &self,
        f: impl FnOnce(&'_ ReadTransaction) -> DbResult<T>,
    ) -> T {
        self.read_with(f).await.expect("Fatal database error")
    }
}

fn expect_db<T, E>(res: DbTxResult<T, E>) -> Result<T, E>
where
    E: snafu::Error + 'static,
{
    match res {
        Ok(o) => Ok(o),
        Err(DbTxError::DbError { source, location }) => {
            panic!("Database error: {source:#} at {location}")
        }
        Err(DbTxError::TxError {
            source,
            location: _,
        }) => Err(source),
    }
}
