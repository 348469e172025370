use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use garcia_core::module::StoreKey;
use garcia_db::Database;
use garcia_util_error::BoxedErrorResult;

use crate::module::db::{ModuleDatabase, ModuleReadableTransaction as _};

const STORE_A: StoreKey = StoreKey::new("a");
const STORE_B: StoreKey = StoreKey::new("b");

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn stores_do_not_share_keys() -> BoxedErrorResult<()> {
    let db = Arc::new(Database::new_in_memory().await?);
    let store_a = ModuleDatabase::new(STORE_A, db.clone());
    let store_b = ModuleDatabase::new(STORE_B, db.clone());

    store_a
        .write_with(|dbtx| {
            dbtx.init_store_tables()?;
            dbtx.kv_set(b"k", b"from a")
        })
        .await?;
    store_b.write_with(|dbtx| dbtx.init_store_tables()).await?;

    assert_eq!(
        store_a.read_with(|dbtx| dbtx.kv_get(b"k")).await?,
        Some(b"from a".to_vec())
    );
    assert_eq!(store_b.read_with(|dbtx| dbtx.kv_get(b"k")).await?, None);

    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn kv_prefix_and_delete() -> BoxedErrorResult<()> {
    let db = Arc::new(Database::new_in_memory().await?);
    let store = ModuleDatabase::new(STORE_A, db);

    store
        .write_with(|dbtx| {
            dbtx.kv_set(b"p_1", b"1")?;
            dbtx.kv_set(b"p_22", b"22")?;
            dbtx.kv_set(b"q_1", b"x")?;
            Ok(())
        })
        .await?;

    let mut prefixed = store.read_with(|dbtx| dbtx.kv_prefix(b"p_")).await?;
    prefixed.sort();
    assert_eq!(
        prefixed,
        vec![
            (b"p_1".to_vec(), b"1".to_vec()),
            (b"p_22".to_vec(), b"22".to_vec()),
        ]
    );

    assert!(store.write_with(|dbtx| dbtx.kv_delete(b"p_1")).await?);
    assert!(!store.write_with(|dbtx| dbtx.kv_delete(b"p_1")).await?);
    assert!(!store.read_with(|dbtx| dbtx.kv_has(b"p_1")).await?);
    assert!(store.read_with(|dbtx| dbtx.kv_has(b"q_1")).await?);

    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn commit_hooks_run_after_commit() -> BoxedErrorResult<()> {
    let db = Arc::new(Database::new_in_memory().await?);
    let store = ModuleDatabase::new(STORE_A, db);
    let committed = Arc::new(AtomicBool::new(false));

    store
        .write_with(|dbtx| {
            let committed_hook = committed.clone();
            dbtx.on_commit(move || committed_hook.store(true, Ordering::SeqCst));
            assert!(!committed.load(Ordering::SeqCst));
            dbtx.kv_set(b"k", b"v")
        })
        .await?;

    assert!(committed.load(Ordering::SeqCst));
    Ok(())
}
