use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::billing::VehicleCategory;

/// Parking lot occupancy, billing and daily revenue.
#[derive(Parser, Debug)]
#[command(name = "parklot", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the database and settings.json
    #[arg(long, global = true, default_value = "parklot-data", env = "PARKLOT_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Park a vehicle in the next free slot
    Park {
        /// Vehicle number, e.g. TS09AB1234
        vehicle: String,

        /// Vehicle category: bike, car, ev or heavy
        #[arg(long, short)]
        category: VehicleCategory,

        /// Request a priority slot
        #[arg(long)]
        priority: bool,
    },

    /// Bill a parked vehicle and free its slot
    Exit {
        /// Vehicle number
        vehicle: String,
    },

    /// Show free slots and parked vehicles
    Status,

    /// Show today's transactions and revenue
    Report,
}
