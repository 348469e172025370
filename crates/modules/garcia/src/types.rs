pub mod genesis;
pub mod keys;
pub mod params;

pub use self::genesis::GenesisState;
pub use self::params::{Params, ParamsError};
