use serde::{Deserialize, Serialize};

use super::{Params, ParamsError};

/// State of the module at genesis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenesisState {
    #[serde(default)]
    pub params: Params,
}

impl GenesisState {
    pub fn default_genesis() -> Self {
        Self {
            params: Params::default_params(),
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        self.params.validate()
    }
}
