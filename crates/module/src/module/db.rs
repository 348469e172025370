use std::sync::Arc;

use garcia_core::module::StoreKey;
use garcia_db::Database;
use garcia_db::ctx::WriteTransactionCtx;
pub use garcia_db::error::{DbError, DbResult, DbTxResult};
use garcia_util_db::collect_with_prefix;
use redb_bincode::redb::{TableError, TableHandle as _};
use redb_bincode::{ReadOnlyTable, ReadTransaction, ReadableTable as _, Table, TableDefinition};

use crate::tables;

/// A wrapper around [`Database`] that encapsulates a store's tables
///
/// This is done by prefixing all table names with `{store_key}_`
pub struct ModuleDatabase {
    store_key: StoreKey,
    inner: Arc<Database>,
}

impl ModuleDatabase {
    pub fn new(store_key: StoreKey, db: Arc<Database>) -> Self {
        Self {
            store_key,
            inner: db,
        }
    }

    pub fn store_key(&self) -> StoreKey {
        self.store_key
    }

    /// Scope a database-wide write transaction to this store
    pub fn scope_write<'a>(&self, dbtx: &'a WriteTransactionCtx) -> ModuleWriteTransactionCtx<'a> {
        ModuleWriteTransactionCtx::new(self.store_key, dbtx)
    }

    /// Scope a database-wide read transaction to this store
    pub fn scope_read<'a>(&self, dbtx: &'a ReadTransaction) -> ModuleReadTransaction<'a> {
        ModuleReadTransaction::new(self.store_key, dbtx)
    }

    /// See [`Database::write_with`]
    pub async fn write_with<T>(
        &self,
        f: impl FnOnce(&'_ ModuleWriteTransactionCtx) -> DbResult<T>,
    ) -> DbResult<T> {
        self.inner
            .write_with(|ctx| f(&self.scope_write(ctx)))
            .await
    }

    /// See [`Database::write_with_expect_falliable`]
    pub async fn write_with_expect_falliable<T, E>(
        &self,
        f: impl FnOnce(&'_ ModuleWriteTransactionCtx) -> DbTxResult<T, E>,
    ) -> Result<T, E>
    where
        E: snafu::Error + 'static,
    {
        self.inner
            .write_with_expect_falliable(|ctx| f(&self.scope_write(ctx)))
            .await
    }

    /// See [`Database::write_with_expect`]
    pub async fn write_with_expect<T>(
        &self,
        f: impl FnOnce(&'_ ModuleWriteTransactionCtx) -> DbResult<T>,
    ) -> T {
        self.inner
            .write_with_expect(|ctx| f(&self.scope_write(ctx)))
            .await
    }

    /// See [`Database::read_with`]
    pub async fn read_with<T>(
        &self,
        f: impl FnOnce(&'_ ModuleReadTransaction) -> DbResult<T>,
    ) -> DbResult<T> {
        self.inner.read_with(|ctx| f(&self.scope_read(ctx))).await
    }

    /// See [`Database::read_with_expect_falliable`]
    pub async fn read_with_expect_falliable<T, E>(
        &self,
        f: impl FnOnce(&'_ ModuleReadTransaction) -> DbTxResult<T, E>,
    ) -> Result<T, E>
    where
        E: snafu::Error + 'static,
    {
        self.inner
            .read_with_expect_falliable(|ctx| f(&self.scope_read(ctx)))
            .await
    }

    /// See [`Database::read_with_expect`]
    pub async fn read_with_expect<T>(
        &self,
        f: impl FnOnce(&'_ ModuleReadTransaction) -> DbResult<T>,
    ) -> T {
        self.inner
            .read_with_expect(|ctx| f(&self.scope_read(ctx)))
            .await
    }
}

pub struct ModuleWriteTransactionCtx<'a> {
    store_key: StoreKey,
    inner: &'a WriteTransactionCtx,
}

impl<'s> ModuleWriteTransactionCtx<'s> {
    pub fn new(store_key: StoreKey, inner: &'s WriteTransactionCtx) -> Self {
        Self { store_key, inner }
    }

    pub fn on_commit(&self, f: impl FnOnce() + 'static) {
        self.inner.on_commit(f);
    }

    /// Make sure the store's tables exist, so they can be opened in read
    /// transactions
    pub fn init_store_tables(&self) -> DbResult<()> {
        self.open_table(&tables::kv::TABLE)?;
        Ok(())
    }

    /// Set `key` to `value` in the store
    pub fn kv_set(&self, key: &[u8], value: &[u8]) -> DbResult<()> {
        let mut tbl = self.open_table(&tables::kv::TABLE)?;
        tbl.insert(&key.to_vec(), &value.to_vec())?;
        Ok(())
    }

    /// Remove `key` from the store, returning whether it was there
    pub fn kv_delete(&self, key: &[u8]) -> DbResult<bool> {
        let mut tbl = self.open_table(&tables::kv::TABLE)?;
        Ok(tbl.remove(&key.to_vec())?.is_some())
    }
}

pub struct ModuleReadTransaction<'a> {
    store_key: StoreKey,
    inner: &'a ReadTransaction,
}

impl<'s> ModuleReadTransaction<'s> {
    pub fn new(store_key: StoreKey, inner: &'s ReadTransaction) -> Self {
        Self { store_key, inner }
    }
}

/// Transactions (read-only or writeable) scoped to a single store
pub trait ModuleReadableTransaction<'s> {
    type Table<K, V>: redb_bincode::ReadableTable<K, V>
    where
        K: bincode::Encode + bincode::Decode<()>,
        V: bincode::Encode + bincode::Decode<()>;

    fn open_table<K, V>(
        &self,
        table_def: &TableDefinition<'_, K, V>,
    ) -> Result<Self::Table<K, V>, TableError>
    where
        K: bincode::Encode + bincode::Decode<()>,
        V: bincode::Encode + bincode::Decode<()>;

    /// Get the value stored under `key`
    fn kv_get(&self, key: &[u8]) -> DbResult<Option<Vec<u8>>> {
        let tbl = self.open_table(&tables::kv::TABLE)?;
        Ok(tbl.get(&key.to_vec())?.map(|v| v.value()))
    }

    fn kv_has(&self, key: &[u8]) -> DbResult<bool> {
        Ok(self.kv_get(key)?.is_some())
    }

    /// All entries with keys starting with `prefix`
    fn kv_prefix(&self, prefix: &[u8]) -> DbResult<Vec<(Vec<u8>, Vec<u8>)>> {
        let tbl = self.open_table(&tables::kv::TABLE)?;
        Ok(collect_with_prefix(&tbl, prefix)?)
    }
}

impl<'s> ModuleReadableTransaction<'s> for ModuleReadTransaction<'s> {
    type Table<K, V>
        = ReadOnlyTable<K, V>
    where
        K: bincode::Encode + bincode::Decode<()>,
        V: bincode::Encode + bincode::Decode<()>;

    fn open_table<K, V>(
        &self,
        table_def: &TableDefinition<'_, K, V>,
    ) -> Result<ReadOnlyTable<K, V>, TableError>
    where
        K: bincode::Encode + bincode::Decode<()>,
        V: bincode::Encode + bincode::Decode<()>,
    {
        self.inner.open_table(&TableDefinition::new(
            &self.store_key.table_name(table_def.as_raw().name()),
        ))
    }
}

impl<'s> ModuleReadableTransaction<'s> for ModuleWriteTransactionCtx<'s> {
    type Table<K, V>
        = Table<'s, K, V>
    where
        K: bincode::Encode + bincode::Decode<()>,
        V: bincode::Encode + bincode::Decode<()>;

    fn open_table<K, V>(
        &self,
        table_def: &TableDefinition<'_, K, V>,
    ) -> Result<Table<'s, K, V>, TableError>
    where
        K: bincode::Encode + bincode::Decode<()>,
        V: bincode::Encode + bincode::Decode<()>,
    {
        self.inner.open_table(&TableDefinition::new(
            &self.store_key.table_name(table_def.as_raw().name()),
        ))
    }
}
