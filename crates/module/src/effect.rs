use std::sync::Arc;

use bincode::{Decode, Encode};
use derive_more::Deref;
use garcia_core::bincode::GARCIA_BINCODE_CONFIG;
use garcia_core::module::ModuleName;
use garcia_util_bincode::decode_whole;
use snafu::{ResultExt as _, Snafu, ensure};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Encode, Decode)]
pub struct EffectId(u32);

impl EffectId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// A typed event a module emits as a result of processing a message
pub trait EffectKind: Encode + Decode<()> {
    const MODULE_NAME: ModuleName;
    const EFFECT_ID: EffectId;
}

/// An encoded effect, along with the module and effect id identifying its
/// type
#[derive(Debug, Clone, Deref)]
pub struct ModuleEffect {
    pub module_name: ModuleName,
    pub effect_id: EffectId,
    #[deref]
    pub raw: Arc<[u8]>,
}

#[derive(Debug, Snafu)]
pub enum EffectDecodeError {
    #[snafu(display("Effect {actual_module}/{actual_id:?} is not {expected_module}/{expected_id:?}"))]
    KindMismatch {
        expected_module: ModuleName,
        expected_id: EffectId,
        actual_module: ModuleName,
        actual_id: EffectId,
    },
    #[snafu(display("Invalid effect encoding"))]
    Decode { source: bincode::error::DecodeError },
}

pub trait EffectKindExt: EffectKind + Sized {
    fn to_effect(&self) -> ModuleEffect {
        ModuleEffect {
            module_name: Self::MODULE_NAME,
            effect_id: Self::EFFECT_ID,
            raw: bincode::encode_to_vec(self, GARCIA_BINCODE_CONFIG)
                .expect("encoding should not fail")
                .into(),
        }
    }

    fn from_effect(effect: &ModuleEffect) -> Result<Self, EffectDecodeError> {
        ensure!(
            effect.module_name == Self::MODULE_NAME && effect.effect_id == Self::EFFECT_ID,
            KindMismatchSnafu {
                expected_module: Self::MODULE_NAME,
                expected_id: Self::EFFECT_ID,
                actual_module: effect.module_name,
                actual_id: effect.effect_id,
            }
        );
        decode_whole(&effect.raw, GARCIA_BINCODE_CONFIG).context(DecodeSnafu)
    }
}

impl<T> EffectKindExt for T where T: EffectKind {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Encode, Decode)]
    struct Ping {
        n: u32,
    }

    impl EffectKind for Ping {
        const MODULE_NAME: ModuleName = ModuleName::new("test");
        const EFFECT_ID: EffectId = EffectId::new(0);
    }

    #[derive(Debug, Encode, Decode)]
    struct Pong {
        n: u32,
    }

    impl EffectKind for Pong {
        const MODULE_NAME: ModuleName = ModuleName::new("test");
        const EFFECT_ID: EffectId = EffectId::new(1);
    }

    #[test]
    fn decode_checks_kind() {
        let effect = Ping { n: 3 }.to_effect();
        assert_eq!(Ping::from_effect(&effect).expect("same kind"), Ping { n: 3 });
        assert!(matches!(
            Pong::from_effect(&effect),
            Err(EffectDecodeError::KindMismatch { .. })
        ));
    }
}
