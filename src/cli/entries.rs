//! Journal entry CLI commands
//!
//! `add` goes through the same resolve-then-submit path as the TUI dialog:
//! an `--*-id` flag plays the part of a picked suggestion, free-text flags
//! create the entity.

use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::{format_entry_details, format_journal_table};
use crate::error::{JournalError, JournalResult};
use crate::models::{parse_entry_date, ClientId, Department, JournalEntryId, ServiceId, VehicleId};
use crate::remote::Directory;
use crate::services::{JournalForm, SelectionState, SubmissionController};

/// Journal entry subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// List a department's journal
    List {
        /// Department (sales or service)
        #[arg(short, long)]
        department: Option<Department>,
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Create a journal entry
    Add(AddEntryArgs),
    /// Append text to an entry's comment
    Comment {
        /// Entry ID (e.g. 11 or jr-11)
        id: JournalEntryId,
        /// Text to append
        text: String,
    },
    /// Toggle an entry's priority flag
    Priority {
        /// Entry ID
        id: JournalEntryId,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AddEntryArgs {
    /// Department (sales or service)
    #[arg(short, long)]
    pub department: Option<Department>,

    /// Existing client ID
    #[arg(long, conflicts_with_all = ["client_name", "phone"])]
    pub client_id: Option<ClientId>,

    /// Name of a new client
    #[arg(long, required_unless_present = "client_id")]
    pub client_name: Option<String>,

    /// Phone of a new client
    #[arg(long)]
    pub phone: Option<String>,

    /// Existing vehicle ID (service only)
    #[arg(long, conflicts_with_all = ["plate", "brand", "model"])]
    pub vehicle_id: Option<VehicleId>,

    /// Plate number of a new vehicle (service only)
    #[arg(long)]
    pub plate: Option<String>,

    /// Brand of a new vehicle
    #[arg(long)]
    pub brand: Option<String>,

    /// Model of a new vehicle
    #[arg(long)]
    pub model: Option<String>,

    /// Service ID (service only, see `journal service list`)
    #[arg(long)]
    pub service_id: Option<ServiceId>,

    /// Entry date (YYYY-MM-DD HH:MM), defaults to now
    #[arg(long)]
    pub date: Option<String>,

    /// Comment
    #[arg(short, long, default_value = "")]
    pub comment: String,
}

impl AddEntryArgs {
    /// Turn the flags into a selection and form
    pub fn into_submission(
        self,
        default_department: Department,
    ) -> JournalResult<(SelectionState, JournalForm)> {
        let department = self.department.unwrap_or(default_department);
        let mut selection = SelectionState::new();

        match self.client_id {
            Some(id) => selection.bind_client(id),
            None => {
                selection.client.name = self.client_name.unwrap_or_default();
                selection.client.phone = self.phone.unwrap_or_default();
            }
        }

        if department.requires_vehicle() {
            match self.vehicle_id {
                Some(id) => selection.bind_vehicle(id),
                None => {
                    if self.plate.is_none() {
                        return Err(JournalError::Validation(
                            "A service entry needs --vehicle-id or --plate/--brand/--model".into(),
                        ));
                    }
                    selection.vehicle.plate_number = self.plate.unwrap_or_default();
                    selection.vehicle.brand = self.brand.unwrap_or_default();
                    selection.vehicle.model = self.model.unwrap_or_default();
                }
            }
        }

        let date = self.date.as_deref().map(parse_entry_date).transpose()?;
        let form = JournalForm {
            department,
            date,
            comment: self.comment,
            service_id: self.service_id,
        };
        Ok((selection, form))
    }
}

/// Handle a journal entry command
pub async fn handle_entry_command<D: Directory + ?Sized>(
    directory: &D,
    settings: &Settings,
    cmd: EntryCommands,
) -> JournalResult<()> {
    match cmd {
        EntryCommands::List { department, limit } => {
            let department = department.unwrap_or(settings.default_department);
            let mut entries = directory.list_journal_entries(department).await?;
            if let Some(limit) = limit {
                entries.truncate(limit);
            }
            print!(
                "{}",
                format_journal_table(department, &entries, &settings.date_format)
            );
        }

        EntryCommands::Add(args) => {
            let (mut selection, form) = args.into_submission(settings.default_department)?;

            if let Some(service_id) = form.service_id {
                let services = directory.list_services().await?;
                if !services.iter().any(|s| s.id == service_id && s.is_active) {
                    return Err(JournalError::service_not_found(service_id.to_string()));
                }
            }

            let mut controller = SubmissionController::new(directory);
            let outcome = controller.submit(&mut selection, &form).await?;

            println!("Created journal entry:");
            print!("{}", format_entry_details(&outcome.entry, &settings.date_format));
            if let Ok(entries) = &outcome.refreshed {
                println!();
                println!("{} journal now has {} entries", form.department.title(), entries.len());
            }
        }

        EntryCommands::Comment { id, text } => {
            let text = text.trim();
            if text.is_empty() {
                return Err(JournalError::Validation("Comment cannot be empty".into()));
            }
            let entry = directory.append_comment(id, text).await?;
            println!("Comment added to {}", entry.id);
            print!("{}", format_entry_details(&entry, &settings.date_format));
        }

        EntryCommands::Priority { id } => {
            let entry = directory.toggle_priority(id).await?;
            println!(
                "{} is {}",
                entry.id,
                if entry.is_priority {
                    "now a priority"
                } else {
                    "no longer a priority"
                }
            );
        }
    }

    Ok(())
}
