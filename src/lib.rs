pub mod allocation;
pub mod billing;
pub mod cli;
pub mod clock;
pub mod db;
pub mod error;
pub mod lot;
pub mod report;
pub mod settings;

use std::{path::Path, process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::Parser;

use cli::Cli;
use clock::SystemClock;
use db::Database;
use lot::{commands::run_command, LotController};
use settings::LotSettings;

pub use error::ParkingError;

/// Open the store and settings under `data_dir` and wire up a controller.
pub fn open_lot(data_dir: &Path) -> anyhow::Result<LotController> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let settings = LotSettings::load_or_init(&data_dir.join("settings.json"))?;
    let database = Database::new(data_dir.join("parklot.sqlite3"))?;

    Ok(LotController::new(
        database,
        settings.layout,
        settings.rates,
        Arc::new(SystemClock),
    ))
}

pub fn run() -> ExitCode {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = (|| -> anyhow::Result<String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start async runtime")?;

        runtime.block_on(async {
            let controller = open_lot(&cli.data_dir)?;
            run_command(&controller, cli.command.clone(), cli.json).await
        })
    })();

    match result {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
