use std::any::Any;
use std::str::FromStr as _;
use std::sync::Arc;

use garcia_core::authority::Authority;
use garcia_core::ver::ConsensusVersion;
use garcia_db::Database;
use garcia_module::effect::EffectKindExt as _;
use garcia_module::module::db::ModuleReadableTransaction as _;
use garcia_module::module::{DynModule, IModuleInit as _, ModuleInitArgs, ModuleInitError};
use garcia_util_error::BoxedErrorResult;

use crate::effects::ParamsUpdatedEffect;
use crate::keeper::Keeper;
use crate::msg::{GarciaMsg, MsgUpdateParams};
use crate::msg_server::{MsgError, MsgServer as _, new_msg_server_impl};
use crate::types::keys::{MEM_STORE_KEY, PARAMS_KEY, STORE_KEY};
use crate::types::{GenesisState, Params};
use crate::{CONSENSUS_VERSION, GarciaModule, GarciaModuleInit, genesis};

struct TestSetup {
    pub module: DynModule,
    pub db: Arc<Database>,
}

impl TestSetup {
    async fn new() -> BoxedErrorResult<Self> {
        Self::with_version(CONSENSUS_VERSION).await
    }

    async fn with_version(version: ConsensusVersion) -> BoxedErrorResult<Self> {
        let db = Arc::new(Database::new_in_memory().await?);
        let mem_db = Arc::new(Database::new_in_memory().await?);

        let module = GarciaModuleInit::new()
            .init(ModuleInitArgs::new(
                STORE_KEY,
                db.clone(),
                Some((MEM_STORE_KEY, mem_db)),
                version,
                authority(),
            ))
            .await?;

        Ok(Self { module, db })
    }

    fn garcia_module(&self) -> &GarciaModule {
        (self.module.as_ref() as &dyn Any)
            .downcast_ref::<GarciaModule>()
            .expect("Module should be GarciaModule")
    }

    fn keeper(&self) -> &Keeper {
        self.garcia_module().keeper()
    }
}

fn authority() -> Authority {
    Authority::from_str("gov").expect("valid")
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn get_params_returns_what_was_set() -> BoxedErrorResult<()> {
    let setup = TestSetup::new().await?;
    let params = Params::default_params();

    setup.keeper().set_params(&params).await?;
    assert_eq!(setup.keeper().get_params().await?, params);

    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn params_are_stored_under_params_key() -> BoxedErrorResult<()> {
    let setup = TestSetup::new().await?;
    let keeper = setup.keeper();

    assert!(!keeper.db().read_with(|dbtx| dbtx.kv_has(PARAMS_KEY)).await?);
    // Nothing stored yet still reads as the defaults
    assert_eq!(keeper.get_params().await?, Params::default());

    keeper.set_params(&Params::default_params()).await?;
    assert!(keeper.db().read_with(|dbtx| dbtx.kv_has(PARAMS_KEY)).await?);

    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn corrupt_params_are_reported() -> BoxedErrorResult<()> {
    let setup = TestSetup::new().await?;
    let keeper = setup.keeper();

    keeper
        .db()
        .write_with(|dbtx| dbtx.kv_set(PARAMS_KEY, &[0xff, 0xff]))
        .await?;

    assert!(keeper.get_params().await.is_err());
    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn msg_server_is_created() -> BoxedErrorResult<()> {
    let setup = TestSetup::new().await?;
    let keeper = setup.garcia_module().keeper().clone();

    let msg_server = new_msg_server_impl(keeper.clone());

    assert!(Arc::ptr_eq(msg_server.keeper(), &keeper));
    assert_eq!(keeper.authority(), &authority());
    assert_eq!(keeper.store_key(), STORE_KEY);
    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn update_params_requires_authority() -> BoxedErrorResult<()> {
    let setup = TestSetup::new().await?;
    let keeper = setup.garcia_module().keeper().clone();
    let msg_server = new_msg_server_impl(keeper.clone());

    let res = keeper
        .db()
        .write_with_expect_falliable(|dbtx| {
            let mut effects = vec![];
            msg_server.update_params(
                dbtx,
                MsgUpdateParams {
                    authority: Authority::from_str("mallory").expect("valid"),
                    params: Params::default_params(),
                },
                &mut effects,
            )
        })
        .await;

    assert!(matches!(res, Err(MsgError::InvalidSigner { .. })));
    assert!(
        !keeper
            .db()
            .read_with(|dbtx| dbtx.kv_has(PARAMS_KEY))
            .await?
    );

    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn update_params_msg_produces_effect() -> BoxedErrorResult<()> {
    let setup = TestSetup::new().await?;

    let msg = GarciaMsg::from(MsgUpdateParams {
        authority: authority(),
        params: Params::default_params(),
    })
    .encode_to_raw();

    let effects = setup
        .keeper()
        .db()
        .write_with_expect_falliable(|dbtx| setup.module.process_msg(dbtx, &msg))
        .await?;

    assert_eq!(effects.len(), 1, "Expected exactly one effect");
    let effect = ParamsUpdatedEffect::from_effect(&effects[0])?;
    assert_eq!(effect.params, Params::default_params());

    assert_eq!(setup.keeper().get_params().await?, Params::default_params());
    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn invalid_msg_is_rejected() -> BoxedErrorResult<()> {
    let setup = TestSetup::new().await?;
    let msg = garcia_core::msg::MsgRaw::from(vec![0x42, 0x00]);

    let res = setup
        .keeper()
        .db()
        .write_with_expect_falliable(|dbtx| setup.module.process_msg(dbtx, &msg))
        .await;

    assert!(res.is_err());
    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn genesis_round_trip() -> BoxedErrorResult<()> {
    let setup = TestSetup::new().await?;
    let keeper = setup.keeper();
    let genesis_state = GenesisState {
        params: Params::default_params(),
    };

    keeper
        .db()
        .write_with_expect_falliable(|dbtx| genesis::init_genesis(dbtx, keeper, &genesis_state))
        .await?;
    let got = keeper
        .db()
        .read_with_expect_falliable(|dbtx| genesis::export_genesis(dbtx, keeper))
        .await?;

    assert_eq!(got, genesis_state);
    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn module_genesis_json_round_trip() -> BoxedErrorResult<()> {
    let setup = TestSetup::new().await?;
    let module = &setup.module;

    let default_genesis = module.default_genesis();
    module.validate_genesis(&default_genesis)?;
    assert!(
        module
            .validate_genesis(&serde_json::json!({ "params": { "unknown": 1 } }))
            .is_err()
    );

    let store_key = setup.keeper().store_key();
    setup
        .db
        .write_with_expect_falliable(|dbtx| {
            module.init_genesis(
                &garcia_module::module::db::ModuleWriteTransactionCtx::new(store_key, dbtx),
                &default_genesis,
            )
        })
        .await?;

    let exported = setup
        .db
        .read_with_expect_falliable(|dbtx| {
            module.export_genesis(&garcia_module::module::db::ModuleReadTransaction::new(
                store_key, dbtx,
            ))
        })
        .await?;

    assert_eq!(exported, default_genesis);
    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn query_params() -> BoxedErrorResult<()> {
    let setup = TestSetup::new().await?;

    let res = setup.garcia_module().query_params().await?;
    assert_eq!(res.params, Params::default_params());
    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn mem_store_is_separate_from_persistent_store() -> BoxedErrorResult<()> {
    let setup = TestSetup::new().await?;
    let keeper = setup.keeper();

    assert_eq!(keeper.mem_store().store_key(), MEM_STORE_KEY);
    keeper
        .mem_store()
        .write_with(|dbtx| dbtx.kv_set(PARAMS_KEY, b"transient"))
        .await?;

    assert!(!keeper.db().read_with(|dbtx| dbtx.kv_has(PARAMS_KEY)).await?);
    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn init_rejects_unsupported_version() -> BoxedErrorResult<()> {
    let res = TestSetup::with_version(ConsensusVersion::new(2)).await;

    let err = res.err().expect("must fail");
    assert!(matches!(
        err.downcast_ref::<ModuleInitError>(),
        Some(ModuleInitError::UnsupportedVersion { .. })
    ));
    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn init_requires_mem_store() -> BoxedErrorResult<()> {
    let db = Arc::new(Database::new_in_memory().await?);

    let res = GarciaModuleInit::new()
        .init(ModuleInitArgs::new(
            STORE_KEY,
            db,
            None,
            CONSENSUS_VERSION,
            authority(),
        ))
        .await;

    assert!(matches!(res, Err(ModuleInitError::MissingMemStore)));
    Ok(())
}
