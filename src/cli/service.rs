//! Service catalogue CLI commands

use clap::Subcommand;

use crate::display::format_service_list;
use crate::error::JournalResult;
use crate::remote::Directory;

/// Service subcommands
#[derive(Subcommand)]
pub enum ServiceCommands {
    /// List services that can be attached to a service entry
    List {
        /// Include inactive services
        #[arg(short, long)]
        all: bool,
    },
}

/// Handle a service command
pub async fn handle_service_command<D: Directory + ?Sized>(
    directory: &D,
    cmd: ServiceCommands,
) -> JournalResult<()> {
    match cmd {
        ServiceCommands::List { all } => {
            let services = directory.list_services().await?;
            print!("{}", format_service_list(&services, all));
        }
    }
    Ok(())
}
