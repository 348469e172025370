use std::path::PathBuf;

use clap::{Parser, Subcommand};
use garcia_core::authority::Authority;

#[derive(Parser, Debug)]
#[command(version, about)]
pub(crate) struct Opts {
    /// Directory with the chain database; an ephemeral in-memory database is
    /// used if not set
    #[arg(long, env = "GARCIA_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Address allowed to update module params
    #[arg(long, env = "GARCIA_AUTHORITY", default_value = "gov", global = true)]
    pub authority: Authority,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Print the default genesis of all modules
    DefaultGenesis,
    /// Initialize the chain state from a genesis file (or the defaults)
    Init {
        #[arg(long)]
        genesis: Option<PathBuf>,
    },
    /// Print the current chain state as a genesis
    Export,
    /// Print the current garcia params
    Params,
    /// Submit a params update for the garcia module
    UpdateParams {
        /// Address signing the update
        #[arg(long)]
        signer: Authority,

        /// New params, as JSON
        #[arg(long, default_value = "{}")]
        params: String,
    },
}
