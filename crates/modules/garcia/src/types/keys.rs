use garcia_core::module::{ModuleName, StoreKey};

/// Name of the module
pub const MODULE_NAME: ModuleName = ModuleName::new("garcia");

/// Primary (persistent) store key of the module
pub const STORE_KEY: StoreKey = StoreKey::from_module_name(MODULE_NAME);

/// In-memory store key of the module
pub const MEM_STORE_KEY: StoreKey = StoreKey::new("mem_garcia");

/// Key the module [`super::Params`] are stored under
pub const PARAMS_KEY: &[u8] = b"p_garcia";

pub fn key_prefix(p: &str) -> Vec<u8> {
    p.as_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_store_layout() {
        assert_eq!(MODULE_NAME.as_str(), "garcia");
        assert_eq!(STORE_KEY.as_str(), MODULE_NAME.as_str());
        assert_eq!(MEM_STORE_KEY.as_str(), "mem_garcia");
        assert_eq!(PARAMS_KEY, b"p_garcia");
    }

    #[test]
    fn key_prefix_is_identity() {
        assert_eq!(key_prefix("p_garcia"), PARAMS_KEY);
        assert!(key_prefix("").is_empty());
    }
}
