use garcia_module::module::db::ModuleReadTransaction;
use serde::{Deserialize, Serialize};

use crate::keeper::{Keeper, KeeperResult};
use crate::types::Params;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParamsRequest {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParamsResponse {
    pub params: Params,
}

/// Read-only queries into the module state
pub trait QueryServer {
    fn params(
        &self,
        dbtx: &ModuleReadTransaction,
        req: QueryParamsRequest,
    ) -> KeeperResult<QueryParamsResponse>;
}

impl QueryServer for Keeper {
    fn params(
        &self,
        dbtx: &ModuleReadTransaction,
        _req: QueryParamsRequest,
    ) -> KeeperResult<QueryParamsResponse> {
        Ok(QueryParamsResponse {
            params: self.get_params_dbtx(dbtx)?,
        })
    }
}
