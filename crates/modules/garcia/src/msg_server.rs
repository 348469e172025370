use std::sync::Arc;

use garcia_core::authority::Authority;
use garcia_db::error::{DbTxResult, TxSnafu};
use garcia_module::effect::{EffectKindExt as _, ModuleEffect};
use garcia_module::module::db::ModuleWriteTransactionCtx;
use snafu::{ResultExt as _, Snafu};
use tracing::info;

use crate::LOG_TARGET;
use crate::effects::ParamsUpdatedEffect;
use crate::keeper::{Keeper, KeeperError};
use crate::msg::{MsgUpdateParams, MsgUpdateParamsResponse};
use crate::types::ParamsError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum MsgError {
    #[snafu(display("Invalid authority; expected {expected}, got {got}"))]
    InvalidSigner { expected: Authority, got: Authority },
    #[snafu(display("Invalid message"))]
    InvalidMsg { source: ParamsError },
    #[snafu(transparent)]
    Keeper { source: KeeperError },
}

pub type MsgResult<T> = DbTxResult<T, MsgError>;

/// Handlers of all [`crate::msg::GarciaMsg`]s
///
/// Effects produced by a handler are appended to `effects`, and only
/// meaningful if the transaction commits.
pub trait MsgServer {
    fn update_params(
        &self,
        dbtx: &ModuleWriteTransactionCtx,
        msg: MsgUpdateParams,
        effects: &mut Vec<ModuleEffect>,
    ) -> MsgResult<MsgUpdateParamsResponse>;
}

pub struct MsgServerImpl {
    keeper: Arc<Keeper>,
}

pub fn new_msg_server_impl(keeper: Arc<Keeper>) -> MsgServerImpl {
    MsgServerImpl { keeper }
}

impl MsgServerImpl {
    pub fn keeper(&self) -> &Arc<Keeper> {
        &self.keeper
    }
}

impl MsgServer for MsgServerImpl {
    fn update_params(
        &self,
        dbtx: &ModuleWriteTransactionCtx,
        msg: MsgUpdateParams,
        effects: &mut Vec<ModuleEffect>,
    ) -> MsgResult<MsgUpdateParamsResponse> {
        if &msg.authority != self.keeper.authority() {
            return InvalidSignerSnafu {
                expected: self.keeper.authority().clone(),
                got: msg.authority,
            }
            .fail()
            .context(TxSnafu);
        }
        msg.validate_basic()
            .context(InvalidMsgSnafu)
            .context(TxSnafu)?;

        self.keeper
            .set_params_dbtx(dbtx, &msg.params)
            .map_err(|err| err.tx_into::<MsgError>())?;

        info!(target: LOG_TARGET, params = ?msg.params, "Params updated");
        effects.push(ParamsUpdatedEffect { params: msg.params }.to_effect());

        Ok(MsgUpdateParamsResponse {})
    }
}
