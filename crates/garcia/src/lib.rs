// SPDX-License-Identifier: MIT

//! Garcia chain application
//!
//! Wires the modules to a database and exposes the chain operations
//! (genesis, messages, queries) as a command line tool.

pub mod app;
pub mod genesis;
mod logging;
mod opts;


use std::sync::Arc;

use app::App;
use clap::Parser as _;
use garcia_module::effect::EffectKindExt as _;
use garcia_module_garcia::effects::ParamsUpdatedEffect;
use garcia_module_garcia::msg::{GarciaMsg, MsgUpdateParams};
use garcia_module_garcia::types::Params;
use garcia_module_garcia::{GarciaModule, GarciaModuleInit, MODULE_NAME};
use garcia_util_error::{Whatever, WhateverResult};
use opts::{Commands, Opts};
use snafu::{OptionExt as _, ResultExt as _};
use tracing::info;

const LOG_TARGET: &str = "garcia::cli";

pub async fn run() -> WhateverResult<()> {
    logging::init_logging()?;

    let opts = Opts::parse();

    let app = App::builder()
        .with_module_init(Arc::new(GarciaModuleInit::new()))
        .maybe_data_dir(opts.data_dir)
        .authority(opts.authority)
        .open()
        .await
        .whatever_context("Failed to open the application")?;

    match opts.command {
        Commands::DefaultGenesis => {
            println!("{}", genesis::genesis_to_json(&app.default_genesis()));
        }
        Commands::Init { genesis } => {
            let genesis = match genesis {
                Some(path) => genesis::read_genesis_file(&path).await?,
                None => app.default_genesis(),
            };
            app.init_chain(&genesis)
                .await
                .whatever_context("Failed to initialize chain")?;
        }
        Commands::Export => {
            let genesis = app
                .export_genesis()
                .await
                .whatever_context("Failed to export genesis")?;
            println!("{}", genesis::genesis_to_json(&genesis));
        }
        Commands::Params => {
            let res = garcia_module(&app)?
                .query_params()
                .await
                .whatever_context("Failed to query params")?;
            println!(
                "{}",
                serde_json::to_string_pretty(&res).whatever_context("Failed to encode params")?
            );
        }
        Commands::UpdateParams { signer, params } => {
            let params: Params = serde_json::from_str(&params)
                .whatever_context::<_, Whatever>("Invalid params JSON")?;
            let msg = GarciaMsg::from(MsgUpdateParams {
                authority: signer,
                params,
            });

            let effects = app
                .deliver_msg(MODULE_NAME.as_str(), &msg.encode_to_raw())
                .await
                .whatever_context("Failed to update params")?;

            for effect in &effects {
                if let Ok(effect) = ParamsUpdatedEffect::from_effect(effect) {
                    info!(target: LOG_TARGET, params = ?effect.params, "Params updated");
                }
            }
        }
    }

    Ok(())
}

fn garcia_module(app: &App) -> WhateverResult<&GarciaModule> {
    app.module::<GarciaModule>(MODULE_NAME)
        .whatever_context("Garcia module not registered")
}
