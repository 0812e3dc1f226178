use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use journal_desk::cli::{
    handle_client_command, handle_entry_command, handle_export_command, handle_service_command,
    handle_vehicle_command, ClientCommands, EntryCommands, ExportArgs, ServiceCommands,
    VehicleCommands,
};
use journal_desk::config::{JournalPaths, Settings};
use journal_desk::logging::{self, LogTarget};
use journal_desk::remote::{Directory, HttpDirectory};

#[derive(Parser)]
#[command(
    name = "journal",
    version,
    about = "Sales and service appointment journal",
    long_about = "journal-desk keeps the dealership's sales and service journal from the \
                  terminal: browse entries, register visits with search-as-you-type for \
                  clients and vehicles, and export the list."
)]
struct Cli {
    /// Base URL of the journal API (overrides the settings file)
    #[arg(long, global = true, env = "JOURNAL_DESK_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Journal entry commands
    #[command(subcommand, alias = "entry")]
    Entries(EntryCommands),

    /// Client lookup
    #[command(subcommand)]
    Client(ClientCommands),

    /// Vehicle lookup
    #[command(subcommand)]
    Vehicle(VehicleCommands),

    /// Service catalogue
    #[command(subcommand)]
    Service(ServiceCommands),

    /// Export a department's journal to CSV, JSON or YAML
    Export(ExportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = JournalPaths::new()?;
    let settings = Settings::load_or_create(&paths)?.with_api_base_url(cli.api_url);
    settings.validate()?;

    let target = match cli.command {
        Some(Commands::Tui) => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    logging::init(target, &paths, &settings)?;

    let Some(command) = cli.command else {
        println!("journal-desk - sales and service journal");
        println!();
        println!("Run 'journal --help' for usage information.");
        println!("Run 'journal tui' to launch the interactive interface.");
        return Ok(());
    };

    if let Commands::Config = command {
        print_config(&paths, &settings);
        return Ok(());
    }

    let runtime = Runtime::new()?;
    let directory = HttpDirectory::from_settings(&settings)?;
    tracing::debug!(api = %directory.base_url(), "using journal API");

    match command {
        Commands::Tui => {
            let directory: Arc<dyn Directory> = Arc::new(directory);
            journal_desk::tui::run_tui(settings, runtime.handle().clone(), directory)?;
        }
        Commands::Entries(cmd) => {
            runtime.block_on(handle_entry_command(&directory, &settings, cmd))?;
        }
        Commands::Client(cmd) => {
            runtime.block_on(handle_client_command(&directory, &settings, cmd))?;
        }
        Commands::Vehicle(cmd) => {
            runtime.block_on(handle_vehicle_command(&directory, &settings, cmd))?;
        }
        Commands::Service(cmd) => {
            runtime.block_on(handle_service_command(&directory, cmd))?;
        }
        Commands::Export(args) => {
            let source = directory.base_url().to_string();
            runtime.block_on(handle_export_command(&directory, &source, args))?;
        }
        Commands::Config => {}
    }

    Ok(())
}

fn print_config(paths: &JournalPaths, settings: &Settings) {
    println!("journal-desk Configuration");
    println!("==========================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Log file:       {}", paths.log_file().display());
    println!();
    println!("Settings:");
    println!("  API base URL:     {}", settings.api_base_url);
    println!("  Request timeout:  {}s", settings.request_timeout_secs);
    println!("  Min search chars: {}", settings.min_query_len);
    println!("  Search ordering:  {:?}", settings.search_ordering);
    println!("  Default tab:      {}", settings.default_department);
    println!("  Date format:      {}", settings.date_format);
    println!("  Log level:        {}", settings.log_level);
}
