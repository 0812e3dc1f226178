//! Vehicle CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_vehicle_list;
use crate::error::JournalResult;
use crate::remote::Directory;

use super::ensure_searchable;

/// Vehicle subcommands
#[derive(Subcommand)]
pub enum VehicleCommands {
    /// Search vehicles by plate number
    Search {
        /// Plate number or part of it
        plate: String,
    },
}

/// Handle a vehicle command
pub async fn handle_vehicle_command<D: Directory + ?Sized>(
    directory: &D,
    settings: &Settings,
    cmd: VehicleCommands,
) -> JournalResult<()> {
    match cmd {
        VehicleCommands::Search { plate } => {
            ensure_searchable(settings, &plate)?;
            let vehicles = directory.search_vehicles_by_plate(plate.trim()).await?;
            print!("{}", format_vehicle_list(&vehicles));
        }
    }
    Ok(())
}
