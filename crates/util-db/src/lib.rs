// SPDX-License-Identifier: MIT

pub use ::redb_bincode;
use redb_bincode::{ReadableTable, StorageError};

#[macro_export]
macro_rules! def_table {
    ($(#[$outer:meta])*
        $name:ident : $k:ty => $v:ty) => {
        #[allow(unused)]
        $(#[$outer])*
        pub mod $name {
            use super::*;
            pub type Key = $k;
            pub type Value = $v;
            pub type Definition<'a> = $crate::redb_bincode::TableDefinition<'a, Key, Value>;
            pub trait ReadableTable: $crate::redb_bincode::ReadableTable<Key, Value> {}
            impl<RT> ReadableTable for RT where RT: $crate::redb_bincode::ReadableTable<Key, Value> {}
            pub type Table<'a> = $crate::redb_bincode::Table<'a, Key, Value>;
            pub const TABLE: Definition = $crate::redb_bincode::TableDefinition::new(stringify!($name));
        }
    };
}

/// Collect all entries of a raw byte table whose key starts with `prefix`
///
/// Keys are stored bincode-encoded (length first), so the table order is not
/// lexicographic over the raw bytes and a range scan can't be used here.
pub fn collect_with_prefix(
    tbl: &impl ReadableTable<Vec<u8>, Vec<u8>>,
    prefix: &[u8],
) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StorageError> {
    let mut res = vec![];
    for kv in tbl.range::<Vec<u8>>(..)? {
        let (k, v) = kv?;
        let k = k.value();
        if k.starts_with(prefix) {
            res.push((k, v.value()));
        }
    }
    Ok(res)
}
