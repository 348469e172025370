//! Module state to and from [`GenesisState`]

use garcia_module::module::db::{ModuleReadableTransaction, ModuleWriteTransactionCtx};
use tracing::debug;

use crate::LOG_TARGET;
use crate::keeper::{Keeper, KeeperResult};
use crate::types::GenesisState;

/// Initialize module state from a genesis
pub fn init_genesis(
    dbtx: &ModuleWriteTransactionCtx,
    keeper: &Keeper,
    genesis: &GenesisState,
) -> KeeperResult<()> {
    debug!(target: LOG_TARGET, ?genesis, "Initializing genesis");
    keeper.set_params_dbtx(dbtx, &genesis.params)
}

/// Export current module state as a genesis
pub fn export_genesis<'s>(
    dbtx: &impl ModuleReadableTransaction<'s>,
    keeper: &Keeper,
) -> KeeperResult<GenesisState> {
    Ok(GenesisState {
        params: keeper.get_params_dbtx(dbtx)?,
    })
}
