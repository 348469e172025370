use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use snafu::Snafu;

/// Module parameters
///
/// No parameters are defined yet; the record exists so they can be added
/// without changing how they are stored, updated and exported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Params {}

#[derive(Debug, Snafu)]
#[snafu(display("Invalid params"))]
pub struct ParamsError;

impl Params {
    pub fn default_params() -> Self {
        Self {}
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        Ok(())
    }
}
