//! Application: the set of modules over a shared database

mod tables;

use std::any::Any;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use garcia_core::authority::Authority;
use garcia_core::module::{ModuleName, StoreKey};
use garcia_core::msg::MsgRaw;
use garcia_db::Database;
use garcia_db::error::{DbError, DbTxError, TxSnafu};
use garcia_module::effect::ModuleEffect;
use garcia_module::module::db::{ModuleReadTransaction, ModuleWriteTransactionCtx};
use garcia_module::module::{
    DynModule, DynModuleInit, ModuleGenesisJson, ModuleInitArgs, ModuleInitError,
};
use garcia_util_db::redb_bincode::ReadableTable as _;
use garcia_util_error::Whatever;
use snafu::{OptionExt as _, ResultExt as _, Snafu, ensure};
use tracing::{debug, info, warn};

use crate::genesis::AppGenesis;

const LOG_TARGET: &str = "garcia::app";
const DB_FILE_NAME: &str = "garcia.redb";

#[derive(Debug, Snafu)]
pub enum AppError {
    #[snafu(display("Database error"))]
    Db { source: DbError },
    #[snafu(display("Failed to initialize module {module}"))]
    ModuleInit {
        module: ModuleName,
        source: ModuleInitError,
    },
    #[snafu(display("Genesis contains unknown module {module}"))]
    UnknownGenesisModule { module: String },
    #[snafu(display("Invalid genesis of module {module}"))]
    InvalidGenesis {
        module: ModuleName,
        source: Whatever,
    },
    #[snafu(display("Chain was already initialized"))]
    AlreadyInitialized,
    #[snafu(display("Chain was not initialized yet"))]
    NotInitialized,
    #[snafu(display("Failed to export genesis of module {module}"))]
    ExportGenesis {
        module: ModuleName,
        source: Whatever,
    },
    #[snafu(display("No module named {module}"))]
    UnknownModule { module: String },
    #[snafu(display("Module {module} rejected the message"))]
    Msg {
        module: ModuleName,
        source: Whatever,
    },
}

pub type AppResult<T> = Result<T, AppError>;

/// An initialized module, along with the store it was given
struct AppModule {
    store_key: StoreKey,
    inner: DynModule,
}

pub struct App {
    db: Arc<Database>,
    modules: BTreeMap<ModuleName, AppModule>,
}

#[bon::bon]
impl App {
    /// Open the database and initialize all registered modules
    ///
    /// Without `data_dir` the database is in-memory, and lost on exit.
    #[builder(finish_fn = open, start_fn = builder)]
    pub async fn build(
        #[builder(field)] modules_inits: BTreeMap<ModuleName, DynModuleInit>,
        data_dir: Option<PathBuf>,
        #[builder(default)] authority: Authority,
    ) -> AppResult<App> {
        let db = Arc::new(Self::open_db(data_dir).await?);
        // Memory stores always start empty
        let mem_db = Arc::new(Database::new_in_memory().await.context(DbSnafu)?);

        db.write_with(|dbtx| {
            dbtx.open_table(&tables::genesis_initialized::TABLE)?;
            Ok(())
        })
        .await
        .context(DbSnafu)?;

        let mut modules = BTreeMap::new();
        for (name, module_init) in modules_inits {
            // TODO: read the version from the db once there is more than one to pick from
            let version = module_init
                .supported_versions()
                .last()
                .copied()
                .expect("Module must support at least one version");

            let store_key = module_init.store_key();
            let module = module_init
                .init(ModuleInitArgs::new(
                    store_key,
                    db.clone(),
                    module_init
                        .mem_store_key()
                        .map(|key| (key, mem_db.clone())),
                    version,
                    authority.clone(),
                ))
                .await
                .context(ModuleInitSnafu { module: name })?;

            debug!(target: LOG_TARGET, module = %name, %version, "Module ready");
            modules.insert(
                name,
                AppModule {
                    store_key,
                    inner: module,
                },
            );
        }

        Ok(Self { db, modules })
    }
}

impl<S: app_build_builder::State> AppBuildBuilder<S> {
    pub fn with_module_init(mut self, module_init: DynModuleInit) -> Self {
        let name = module_init.name();
        if self.modules_inits.insert(name, module_init).is_some() {
            panic!("Multiple module inits with the same name {name}")
        }
        self
    }
}

impl App {
    async fn open_db(data_dir: Option<PathBuf>) -> AppResult<Database> {
        if let Some(data_dir) = data_dir {
            let path = data_dir.join(DB_FILE_NAME);
            info!(target: LOG_TARGET, path = %path.display(), "Opening redb database…");
            Database::open(path).await.context(DbSnafu)
        } else {
            warn!(target: LOG_TARGET, "Using ephemeral in-memory database!");
            Database::new_in_memory().await.context(DbSnafu)
        }
    }

    /// Get a concrete module implementation by name
    pub fn module<T: Any>(&self, name: ModuleName) -> Option<&T> {
        let module = self.modules.get(&name)?;
        (module.inner.as_ref() as &dyn Any).downcast_ref::<T>()
    }

    fn find_module(&self, name: &str) -> AppResult<&AppModule> {
        self.modules
            .iter()
            .find(|(module_name, _)| module_name.as_str() == name)
            .map(|(_, module)| module)
            .context(UnknownModuleSnafu { module: name })
    }

    pub fn default_genesis(&self) -> AppGenesis {
        self.modules
            .iter()
            .map(|(name, module)| (name.as_str().to_owned(), module.inner.default_genesis()))
            .collect()
    }

    pub async fn is_initialized(&self) -> AppResult<bool> {
        self.db
            .read_with(|dbtx| {
                let tbl = dbtx.open_table(&tables::genesis_initialized::TABLE)?;
                Ok(tbl.get(&())?.is_some())
            })
            .await
            .context(DbSnafu)
    }

    /// Validate and apply `genesis` to every module, in one transaction
    ///
    /// Modules missing from `genesis` start with their default genesis.
    pub async fn init_chain(&self, genesis: &AppGenesis) -> AppResult<()> {
        if let Some(unknown) = genesis
            .keys()
            .find(|name| self.find_module(name).is_err())
        {
            return UnknownGenesisModuleSnafu { module: unknown }.fail();
        }

        let mut modules_genesis: Vec<(ModuleName, &AppModule, ModuleGenesisJson)> = vec![];
        for (name, module) in &self.modules {
            let module_genesis = genesis
                .get(name.as_str())
                .cloned()
                .unwrap_or_else(|| module.inner.default_genesis());
            module
                .inner
                .validate_genesis(&module_genesis)
                .context(InvalidGenesisSnafu { module: *name })?;
            modules_genesis.push((*name, module, module_genesis));
        }

        self.db
            .write_with_expect_falliable(|dbtx| {
                let mut tbl = dbtx.open_table(&tables::genesis_initialized::TABLE)?;
                if tbl.insert(&(), &())?.is_some() {
                    return AlreadyInitializedSnafu.fail().context(TxSnafu);
                }
                drop(tbl);

                for (name, module, module_genesis) in &modules_genesis {
                    module
                        .inner
                        .init_genesis(
                            &ModuleWriteTransactionCtx::new(module.store_key, dbtx),
                            module_genesis,
                        )
                        .map_err(|err| {
                            err.map(|source| AppError::InvalidGenesis {
                                module: *name,
                                source,
                            })
                        })?;
                }
                Ok::<_, DbTxError<AppError>>(())
            })
            .await?;

        info!(target: LOG_TARGET, modules = self.modules.len(), "Chain initialized from genesis");
        Ok(())
    }

    /// Dump the state of every module as a genesis
    pub async fn export_genesis(&self) -> AppResult<AppGenesis> {
        ensure!(self.is_initialized().await?, NotInitializedSnafu);

        self.db
            .read_with_expect_falliable(|dbtx| {
                let mut genesis = AppGenesis::new();
                for (name, module) in &self.modules {
                    let module_genesis = module
                        .inner
                        .export_genesis(&ModuleReadTransaction::new(module.store_key, dbtx))
                        .map_err(|err| {
                            err.map(|source| AppError::ExportGenesis {
                                module: *name,
                                source,
                            })
                        })?;
                    genesis.insert(name.as_str().to_owned(), module_genesis);
                }
                Ok::<_, DbTxError<AppError>>(genesis)
            })
            .await
    }

    /// Route an encoded message to the module `module` and execute it
    ///
    /// State changes are committed only if the module accepts the message.
    /// Fails with [`AppError::NotInitialized`] before [`Self::init_chain`].
    pub async fn deliver_msg(&self, module: &str, msg: &MsgRaw) -> AppResult<Vec<ModuleEffect>> {
        let app_module = self.find_module(module)?;
        let name = app_module.inner.name();

        let effects = self
            .db
            .write_with_expect_falliable(|dbtx| {
                let tbl = dbtx.open_table(&tables::genesis_initialized::TABLE)?;
                if tbl.get(&())?.is_none() {
                    return NotInitializedSnafu.fail().context(TxSnafu);
                }
                drop(tbl);

                app_module
                    .inner
                    .process_msg(&ModuleWriteTransactionCtx::new(app_module.store_key, dbtx), msg)
                    .map_err(|err| err.map(|source| AppError::Msg { module: name, source }))
            })
            .await?;

        debug!(target: LOG_TARGET, module = %name, effects = effects.len(), "Message processed");
        Ok(effects)
    }
}
