use std::sync::{Arc, Mutex};
use std::{ops, result};

use redb_bincode::{WriteTransaction, redb};

type CommitHook = Box<dyn FnOnce() + 'static>;

/// A write transaction with hooks to run once it is committed
pub struct WriteTransactionCtx {
    dbtx: WriteTransaction,
    on_commit: Mutex<Vec<CommitHook>>,
    commit_hook_order_lock: Arc<Mutex<()>>,
}

impl WriteTransactionCtx {
    pub fn new(dbtx: WriteTransaction, commit_hook_order_lock: Arc<Mutex<()>>) -> Self {
        Self {
            dbtx,
            on_commit: Mutex::new(vec![]),
            commit_hook_order_lock,
        }
    }

    /// Register `f` to be called after a successful commit
    ///
    /// Hooks are dropped without running if the transaction is aborted.
    pub fn on_commit(&self, f: impl FnOnce() + 'static) {
        self.on_commit
            .lock()
            .expect("Locking failed")
            .push(Box::new(f));
    }

    pub(super) fn commit(self) -> result::Result<(), redb::CommitError> {
        let Self {
            dbtx,
            on_commit,
            commit_hook_order_lock,
        } = self;

        // Only one write tx exists at a time, but once `commit` returns the next
        // one can start, so hold the lock while running hooks to keep them in
        // commit order.
        let _guard = commit_hook_order_lock.lock().expect("Can't fail");

        dbtx.commit()?;

        for hook in on_commit.lock().expect("Locking failed").drain(..) {
            hook();
        }
        Ok(())
    }
}

impl ops::Deref for WriteTransactionCtx {
    type Target = WriteTransaction;

    fn deref(&self) -> &Self::Target {
        &self.dbtx
    }
}

impl ops::DerefMut for WriteTransactionCtx {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.dbtx
    }
}
