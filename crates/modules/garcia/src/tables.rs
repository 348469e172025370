use garcia_core::ver::ConsensusVersion;
use garcia_util_db::def_table;

def_table! {
    /// Own current consensus version
    ///
    /// Used to detect a version change, for the purpose of state migration.
    self_version: () => ConsensusVersion
}
