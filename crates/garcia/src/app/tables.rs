use garcia_util_db::def_table;

def_table! {
    /// Set once the chain state was initialized from a genesis
    genesis_initialized: () => ()
}
