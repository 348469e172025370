use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use garcia_core::module::{ModuleName, StoreKey};
use garcia_core::ver::ConsensusVersion;
use garcia_module::module::{
    DynModule, IModuleInit, MissingMemStoreSnafu, ModuleInitArgs, ModuleInitResult,
    UnsupportedVersionSnafu,
};
use snafu::{OptionExt as _, ensure};
use tracing::info;

use crate::keeper::Keeper;
use crate::module::GarciaModule;
use crate::types::keys::{MEM_STORE_KEY, STORE_KEY};
use crate::{CONSENSUS_VERSION, LOG_TARGET, MODULE_NAME};

#[derive(Default)]
pub struct GarciaModuleInit;

impl GarciaModuleInit {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IModuleInit for GarciaModuleInit {
    fn name(&self) -> ModuleName {
        MODULE_NAME
    }

    fn store_key(&self) -> StoreKey {
        STORE_KEY
    }

    fn mem_store_key(&self) -> Option<StoreKey> {
        Some(MEM_STORE_KEY)
    }

    fn supported_versions(&self) -> BTreeSet<ConsensusVersion> {
        BTreeSet::from([CONSENSUS_VERSION])
    }

    async fn init(&self, args: ModuleInitArgs) -> ModuleInitResult<DynModule> {
        let supported = self.supported_versions();
        ensure!(
            supported.contains(&args.module_consensus_version),
            UnsupportedVersionSnafu {
                requested: args.module_consensus_version,
                supported,
            }
        );
        let mem_db = args.mem_db.context(MissingMemStoreSnafu)?;

        args.db
            .write_with_expect(|dbtx| GarciaModule::init_db_tx(dbtx, args.module_consensus_version))
            .await;
        mem_db
            .write_with_expect(|dbtx| dbtx.init_store_tables())
            .await;

        info!(
            target: LOG_TARGET,
            version = %args.module_consensus_version,
            authority = %args.authority,
            "Garcia module initialized"
        );

        let keeper = Keeper::new(args.db, mem_db, args.authority);
        Ok(Arc::new(GarciaModule::new(
            args.module_consensus_version,
            keeper,
        )))
    }
}
