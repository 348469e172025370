use std::collections::BTreeMap;
use std::path::Path;

use garcia_module::module::ModuleGenesisJson;
use garcia_util_error::{Whatever, WhateverResult};
use snafu::ResultExt as _;

/// Genesis of the whole application: module name -> module genesis
pub type AppGenesis = BTreeMap<String, ModuleGenesisJson>;

pub async fn read_genesis_file(path: &Path) -> WhateverResult<AppGenesis> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_whatever_context::<_, _, Whatever>(|_| {
            format!("Failed to read genesis file {}", path.display())
        })?;
    parse_genesis(&content)
}

pub fn parse_genesis(content: &str) -> WhateverResult<AppGenesis> {
    serde_json::from_str(content).whatever_context("Genesis must be a JSON object of modules")
}

pub fn genesis_to_json(genesis: &AppGenesis) -> String {
    serde_json::to_string_pretty(genesis).expect("Can't fail")
}
