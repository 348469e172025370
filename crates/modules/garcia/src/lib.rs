// SPDX-License-Identifier: MIT

//! Garcia module
//!
//! Owns the `garcia` store, with the module [`types::Params`] kept under
//! [`types::keys::PARAMS_KEY`]. Params can be set at genesis, changed by
//! the configured authority with [`msg::MsgUpdateParams`], and queried.

pub mod effects;
pub mod genesis;
pub mod init;
pub mod keeper;
pub mod module;
pub mod msg;
pub mod msg_server;
pub mod query;
pub mod types;

pub use self::init::*;
pub use self::module::*;

mod tables;

#[cfg(test)]
mod tests;

use garcia_core::ver::ConsensusVersion;

pub use self::types::keys::MODULE_NAME;

const CONSENSUS_VERSION: ConsensusVersion = ConsensusVersion::new(1);

pub(crate) const LOG_TARGET: &str = "garcia::module::garcia";
