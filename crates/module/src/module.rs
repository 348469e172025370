pub mod db;

use std::any::Any;
use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use db::{ModuleDatabase, ModuleReadTransaction, ModuleWriteTransactionCtx};
use garcia_core::authority::Authority;
use garcia_core::module::{ModuleName, StoreKey};
use garcia_core::msg::MsgRaw;
use garcia_core::ver::ConsensusVersion;
use garcia_db::Database;
use garcia_db::error::DbTxResult;
use garcia_util_error::{Whatever, WhateverResult};
use snafu::Snafu;

use crate::effect::ModuleEffect;

/// Genesis of a single module, in its JSON form
pub type ModuleGenesisJson = serde_json::Value;

#[non_exhaustive]
pub struct ModuleInitArgs {
    /// Module's persistent store
    pub db: ModuleDatabase,
    /// Module's in-memory store, if it asked for one
    pub mem_db: Option<ModuleDatabase>,
    pub module_consensus_version: ConsensusVersion,
    /// Address allowed to change module's params
    pub authority: Authority,
}

impl ModuleInitArgs {
    pub fn new(
        store_key: StoreKey,
        db: Arc<Database>,
        mem_store: Option<(StoreKey, Arc<Database>)>,
        module_consensus_version: ConsensusVersion,
        authority: Authority,
    ) -> Self {
        Self {
            db: ModuleDatabase::new(store_key, db),
            mem_db: mem_store.map(|(key, db)| ModuleDatabase::new(key, db)),
            module_consensus_version,
            authority,
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ModuleInitError {
    #[snafu(display("Unsupported consensus version {requested}, supported: {supported:?}"))]
    UnsupportedVersion {
        requested: ConsensusVersion,
        supported: BTreeSet<ConsensusVersion>,
    },
    #[snafu(display("Module requires an in-memory store"))]
    MissingMemStore,
}

pub type ModuleInitResult<T> = Result<T, ModuleInitError>;

pub type DynModuleInit = Arc<dyn IModuleInit + Send + Sync>;

/// Module "constructor"
#[async_trait]
pub trait IModuleInit: Any {
    fn name(&self) -> ModuleName;

    /// Key of the persistent store the module should be given
    fn store_key(&self) -> StoreKey;

    /// Key of the in-memory store the module should be given, if any
    fn mem_store_key(&self) -> Option<StoreKey> {
        None
    }

    /// All consensus versions this implementation can run at
    fn supported_versions(&self) -> BTreeSet<ConsensusVersion>;

    /// Create an instance of module for given arguments
    ///
    /// Note that in principle this might be called multiple times during the
    /// runtime, e.g. because the version changed.
    async fn init(&self, args: ModuleInitArgs) -> ModuleInitResult<DynModule>;
}

pub type DynModule = Arc<dyn IModule + Send + Sync>;

pub trait IModule: Any {
    fn name(&self) -> ModuleName;

    fn consensus_version(&self) -> ConsensusVersion;

    /// Genesis a chain starts with if nothing else was given for the module
    fn default_genesis(&self) -> ModuleGenesisJson;

    /// Check the genesis is well-formed and valid, without touching any state
    fn validate_genesis(&self, genesis: &ModuleGenesisJson) -> WhateverResult<()>;

    /// Set up module state from `genesis`
    fn init_genesis(
        &self,
        dbtx: &ModuleWriteTransactionCtx,
        genesis: &ModuleGenesisJson,
    ) -> DbTxResult<(), Whatever>;

    /// Dump module state as a genesis
    fn export_genesis(&self, dbtx: &ModuleReadTransaction)
    -> DbTxResult<ModuleGenesisJson, Whatever>;

    /// Decode and execute a message routed to this module
    fn process_msg(
        &self,
        dbtx: &ModuleWriteTransactionCtx,
        msg: &MsgRaw,
    ) -> DbTxResult<Vec<ModuleEffect>, Whatever>;
}
