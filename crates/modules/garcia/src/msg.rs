use bincode::{Decode, Encode};
use garcia_core::authority::Authority;
use garcia_core::bincode::GARCIA_BINCODE_CONFIG;
use garcia_core::msg::MsgRaw;
use garcia_util_bincode::decode_whole;
use garcia_util_error::WhateverResult;
use serde::{Deserialize, Serialize};
use snafu::ResultExt as _;

use crate::types::{Params, ParamsError};

/// Messages the garcia module accepts
#[derive(Debug, Clone, Encode, Decode, Serialize, Deserialize)]
pub enum GarciaMsg {
    UpdateParams(MsgUpdateParams),
}

impl GarciaMsg {
    pub fn encode_to_raw(&self) -> MsgRaw {
        let serialized = bincode::encode_to_vec(self, GARCIA_BINCODE_CONFIG)
            .expect("encoding should not fail");
        MsgRaw(serialized.into())
    }

    pub fn decode_from_raw(msg_raw: &MsgRaw) -> WhateverResult<Self> {
        decode_whole(msg_raw, GARCIA_BINCODE_CONFIG).whatever_context("Failed to decode GarciaMsg")
    }
}

/// Replace module params; only accepted from the module authority
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct MsgUpdateParams {
    pub authority: Authority,
    pub params: Params,
}

impl MsgUpdateParams {
    /// Stateless checks
    pub fn validate_basic(&self) -> Result<(), ParamsError> {
        self.params.validate()
    }
}

impl From<MsgUpdateParams> for GarciaMsg {
    fn from(value: MsgUpdateParams) -> Self {
        Self::UpdateParams(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateParamsResponse {}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn raw_msg_rejects_garbage() {
        let msg = GarciaMsg::from(MsgUpdateParams {
            authority: Authority::from_str("gov").expect("valid"),
            params: Params::default_params(),
        });
        let raw = msg.encode_to_raw();
        assert!(matches!(
            GarciaMsg::decode_from_raw(&raw),
            Ok(GarciaMsg::UpdateParams(MsgUpdateParams { .. }))
        ));

        let mut bytes = raw.to_vec();
        bytes.push(0xff);
        assert!(GarciaMsg::decode_from_raw(&MsgRaw::from(bytes)).is_err());
        assert!(GarciaMsg::decode_from_raw(&MsgRaw::from(vec![0x7f])).is_err());
    }
}
