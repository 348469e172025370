use garcia_core::authority::Authority;
use garcia_core::bincode::GARCIA_BINCODE_CONFIG;
use garcia_core::module::StoreKey;
use garcia_db::error::{DbTxResult, TxSnafu};
use garcia_module::module::db::{ModuleDatabase, ModuleReadableTransaction, ModuleWriteTransactionCtx};
use garcia_util_bincode::decode_whole;
use snafu::{ResultExt as _, Snafu};
use tracing::debug;

use crate::LOG_TARGET;
use crate::types::keys::PARAMS_KEY;
use crate::types::{Params, ParamsError};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum KeeperError {
    #[snafu(display("Refusing to store invalid params"))]
    InvalidParams { source: ParamsError },
    #[snafu(display("Stored params can't be decoded"))]
    CorruptParams {
        source: bincode::error::DecodeError,
    },
}

pub type KeeperResult<T> = DbTxResult<T, KeeperError>;

/// Owns access to the module's stores
pub struct Keeper {
    db: ModuleDatabase,
    mem_db: ModuleDatabase,
    /// The only address allowed to update params, usually governance
    authority: Authority,
}

impl Keeper {
    pub fn new(db: ModuleDatabase, mem_db: ModuleDatabase, authority: Authority) -> Self {
        Self {
            db,
            mem_db,
            authority,
        }
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    pub fn store_key(&self) -> StoreKey {
        self.db.store_key()
    }

    pub fn db(&self) -> &ModuleDatabase {
        &self.db
    }

    /// The in-memory store, reset on every start
    pub fn mem_store(&self) -> &ModuleDatabase {
        &self.mem_db
    }

    /// Current params, or the default ones if none were stored yet
    pub fn get_params_dbtx<'s>(
        &self,
        dbtx: &impl ModuleReadableTransaction<'s>,
    ) -> KeeperResult<Params> {
        let Some(raw) = dbtx.kv_get(PARAMS_KEY)? else {
            return Ok(Params::default());
        };

        decode_whole(&raw, GARCIA_BINCODE_CONFIG)
            .context(CorruptParamsSnafu)
            .context(TxSnafu)
    }

    pub fn set_params_dbtx(
        &self,
        dbtx: &ModuleWriteTransactionCtx,
        params: &Params,
    ) -> KeeperResult<()> {
        params
            .validate()
            .context(InvalidParamsSnafu)
            .context(TxSnafu)?;

        let raw =
            bincode::encode_to_vec(params, GARCIA_BINCODE_CONFIG).expect("encoding should not fail");
        dbtx.kv_set(PARAMS_KEY, &raw)?;

        debug!(target: LOG_TARGET, ?params, "Params set");
        Ok(())
    }

    pub async fn get_params(&self) -> Result<Params, KeeperError> {
        self.db
            .read_with_expect_falliable(|dbtx| self.get_params_dbtx(dbtx))
            .await
    }

    pub async fn set_params(&self, params: &Params) -> Result<(), KeeperError> {
        self.db
            .write_with_expect_falliable(|dbtx| self.set_params_dbtx(dbtx, params))
            .await
    }
}
