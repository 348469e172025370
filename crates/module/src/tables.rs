//! Tables every module store has

use garcia_util_db::def_table;

def_table! {
    /// Raw key-value data of a store
    ///
    /// Modules lay out their own keys (see e.g. a module's params key).
    kv: Vec<u8> => Vec<u8>
}
