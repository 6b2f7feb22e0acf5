//! `nompool` operator CLI.
//!
//! Runs pool qualification and scans against a JSON chain snapshot, and
//! derives pool accounts. Results are printed as pretty JSON on stdout; logs
//! go to stderr.

mod error;
mod snapshot;

use crate::{error::CliError, snapshot::Snapshot};
use clap::{Parser, Subcommand};
use futures::executor::block_on;
use nompool_core::{
    PoolQualifier, PoolScanner,
    config::{Config, ConfigModel},
    domain::{PalletId, PoolAccounts},
    log,
    types::{AccountId, PoolId},
};
use serde::Serialize;
use std::{path::PathBuf, process::ExitCode, sync::Arc};

///
/// Cli
///

#[derive(Parser)]
#[command(name = "nompool", version, about = "Nomination pool selection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan every pool in random order and print the passing ones
    Scan {
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,

        /// Fixed scan-order seed; overrides `scan.seed`
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Qualify a single pool and print its record
    Qualify {
        pool_id: PoolId,

        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the stash and reward accounts of a pool
    Derive {
        pool_id: PoolId,

        #[arg(long, default_value_t = PalletId::default())]
        pallet_id: PalletId,
    },
}

///
/// DerivedAccounts
///

#[derive(Serialize)]
struct DerivedAccounts {
    pool_id: PoolId,
    pallet_id: PalletId,
    stash: AccountId,
    reward: AccountId,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log!(Error, "{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<String, CliError> {
    match command {
        Command::Scan {
            snapshot,
            config,
            seed,
        } => {
            let mut config = load_config(config)?;
            if seed.is_some() {
                config.scan.seed = seed;
            }

            let snapshot = Arc::new(Snapshot::load(snapshot)?);
            let scanner = PoolScanner::new(snapshot.clone(), snapshot, config.policy, config.scan);
            let records = block_on(scanner.scan())?;

            render(&records)
        }

        Command::Qualify {
            pool_id,
            snapshot,
            config,
        } => {
            let config = load_config(config)?;

            let snapshot = Arc::new(Snapshot::load(snapshot)?);
            let qualifier = PoolQualifier::new(snapshot.clone(), snapshot, config.policy)
                .with_pallet_id(config.scan.pallet_id);
            let record = block_on(qualifier.qualify(pool_id))?;

            render(&record)
        }

        Command::Derive { pool_id, pallet_id } => {
            let accounts = PoolAccounts::derive(pallet_id, pool_id);

            render(&DerivedAccounts {
                pool_id,
                pallet_id,
                stash: accounts.stash,
                reward: accounts.reward,
            })
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<ConfigModel, CliError> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => ConfigModel::default(),
    };
    config.log.apply();

    Ok(config)
}

fn render<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|err| CliError::Render(err.to_string()))
}
