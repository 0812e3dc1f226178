//! Client CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_client_list;
use crate::error::JournalResult;
use crate::remote::Directory;

use super::ensure_searchable;

/// Client subcommands
#[derive(Subcommand)]
pub enum ClientCommands {
    /// Search clients by name or phone
    Search {
        /// Text to search for
        query: String,
    },
}

/// Handle a client command
pub async fn handle_client_command<D: Directory + ?Sized>(
    directory: &D,
    settings: &Settings,
    cmd: ClientCommands,
) -> JournalResult<()> {
    match cmd {
        ClientCommands::Search { query } => {
            ensure_searchable(settings, &query)?;
            let clients = directory.search_clients(query.trim()).await?;
            print!("{}", format_client_list(&clients));
        }
    }
    Ok(())
}
