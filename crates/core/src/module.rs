use std::fmt;

/// Name a module is registered and routed under
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ModuleName(&'static str);

impl ModuleName {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Key identifying a store (a namespace of tables) in a database
///
/// Every table a module opens through its store is named
/// `{store_key}_{table}`, so distinct store keys never share data.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StoreKey(&'static str);

impl StoreKey {
    pub const fn new(key: &'static str) -> Self {
        Self(key)
    }

    /// Store key named the same as the module
    pub const fn from_module_name(name: ModuleName) -> Self {
        Self(name.0)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn table_name(&self, table: &str) -> String {
        format!("{}_{table}", self.0)
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_are_namespaced() {
        let key = StoreKey::from_module_name(ModuleName::new("garcia"));
        assert_eq!(key.as_str(), "garcia");
        assert_eq!(key.table_name("kv"), "garcia_kv");
        assert_ne!(
            StoreKey::new("mem_garcia").table_name("kv"),
            key.table_name("kv")
        );
    }
}
