use bincode::{Decode, Encode};
use derive_more::{Display, From};

/// Version of a module's state-machine logic
///
/// Bumped whenever a module's state layout or processing changes in a way
/// that needs a migration.
#[derive(
    Encode, Decode, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Display, From,
)]
pub struct ConsensusVersion(u64);

impl ConsensusVersion {
    pub const fn new(v: u64) -> Self {
        Self(v)
    }
}
