use bincode::{Decode, Encode};
use garcia_core::module::ModuleName;
use garcia_module::effect::{EffectId, EffectKind};
use serde::{Deserialize, Serialize};

use crate::types::Params;

/// Params were changed by the authority
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct ParamsUpdatedEffect {
    pub params: Params,
}

impl EffectKind for ParamsUpdatedEffect {
    const MODULE_NAME: ModuleName = crate::MODULE_NAME;
    const EFFECT_ID: EffectId = EffectId::new(0);
}
