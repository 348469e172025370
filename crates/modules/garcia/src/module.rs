use std::sync::Arc;

use garcia_core::module::ModuleName;
use garcia_core::msg::MsgRaw;
use garcia_core::ver::ConsensusVersion;
use garcia_db::error::{DbResult, DbTxResult, TxSnafu};
use garcia_module::effect::ModuleEffect;
use garcia_module::module::db::{
    ModuleReadTransaction, ModuleReadableTransaction as _, ModuleWriteTransactionCtx,
};
use garcia_module::module::{IModule, ModuleGenesisJson};
use garcia_util_error::{Whatever, WhateverResult};
use snafu::{FromString as _, ResultExt as _};
use tracing::{debug, warn};

use crate::keeper::{Keeper, KeeperError};
use crate::msg::GarciaMsg;
use crate::msg_server::{MsgServer as _, MsgServerImpl, new_msg_server_impl};
use crate::query::{QueryParamsRequest, QueryParamsResponse, QueryServer as _};
use crate::types::GenesisState;
use crate::{LOG_TARGET, MODULE_NAME, genesis, tables};

pub struct GarciaModule {
    pub(crate) version: ConsensusVersion,
    pub(crate) keeper: Arc<Keeper>,
    pub(crate) msg_server: MsgServerImpl,
}

impl GarciaModule {
    pub fn new(version: ConsensusVersion, keeper: Keeper) -> Self {
        let keeper = Arc::new(keeper);
        Self {
            version,
            msg_server: new_msg_server_impl(keeper.clone()),
            keeper,
        }
    }

    pub fn keeper(&self) -> &Arc<Keeper> {
        &self.keeper
    }

    /// Set up module tables and record the version the module runs at
    pub(crate) fn init_db_tx(
        dbtx: &ModuleWriteTransactionCtx,
        version: ConsensusVersion,
    ) -> DbResult<()> {
        dbtx.init_store_tables()?;

        let mut tbl = dbtx.open_table(&tables::self_version::TABLE)?;
        let prev = tbl.insert(&(), &version)?.map(|v| v.value());

        match prev {
            None => debug!(target: LOG_TARGET, %version, "Initialized module tables"),
            Some(prev) if prev != version => {
                warn!(target: LOG_TARGET, %prev, %version, "Module consensus version changed");
            }
            Some(_) => {}
        }

        Ok(())
    }

    pub async fn query_params(&self) -> Result<QueryParamsResponse, KeeperError> {
        self.keeper
            .db()
            .read_with_expect_falliable(|dbtx| self.keeper.params(dbtx, QueryParamsRequest {}))
            .await
    }

    fn parse_genesis(genesis: &ModuleGenesisJson) -> WhateverResult<GenesisState> {
        let genesis: GenesisState = serde_json::from_value(genesis.clone())
            .whatever_context::<_, Whatever>("Failed to parse garcia genesis")?;
        genesis
            .validate()
            .whatever_context::<_, Whatever>("Invalid garcia genesis")?;
        Ok(genesis)
    }
}

fn into_whatever<E>(message: &'static str) -> impl FnOnce(E) -> Whatever
where
    E: std::error::Error + Send + Sync + 'static,
{
    move |err| Whatever::with_source(Box::new(err), message.to_owned())
}

impl IModule for GarciaModule {
    fn name(&self) -> ModuleName {
        MODULE_NAME
    }

    fn consensus_version(&self) -> ConsensusVersion {
        self.version
    }

    fn default_genesis(&self) -> ModuleGenesisJson {
        serde_json::to_value(GenesisState::default_genesis()).expect("Can't fail")
    }

    fn validate_genesis(&self, genesis: &ModuleGenesisJson) -> WhateverResult<()> {
        Self::parse_genesis(genesis).map(|_| ())
    }

    fn init_genesis(
        &self,
        dbtx: &ModuleWriteTransactionCtx,
        genesis: &ModuleGenesisJson,
    ) -> DbTxResult<(), Whatever> {
        let genesis = Self::parse_genesis(genesis).context(TxSnafu)?;

        genesis::init_genesis(dbtx, &self.keeper, &genesis)
            .map_err(|err| err.map(into_whatever("Failed to init garcia genesis")))
    }

    fn export_genesis(
        &self,
        dbtx: &ModuleReadTransaction,
    ) -> DbTxResult<ModuleGenesisJson, Whatever> {
        let genesis = genesis::export_genesis(dbtx, &self.keeper)
            .map_err(|err| err.map(into_whatever("Failed to export garcia genesis")))?;

        serde_json::to_value(genesis)
            .whatever_context("Failed to serialize garcia genesis")
            .context(TxSnafu)
    }

    fn process_msg(
        &self,
        dbtx: &ModuleWriteTransactionCtx,
        msg: &MsgRaw,
    ) -> DbTxResult<Vec<ModuleEffect>, Whatever> {
        let msg = GarciaMsg::decode_from_raw(msg).context(TxSnafu)?;
        let mut effects = vec![];

        match msg {
            GarciaMsg::UpdateParams(msg) => {
                self.msg_server
                    .update_params(dbtx, msg, &mut effects)
                    .map_err(|err| err.map(into_whatever("MsgUpdateParams failed")))?;
            }
        }

        Ok(effects)
    }
}
