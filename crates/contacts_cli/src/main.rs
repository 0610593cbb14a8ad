//! Command-line front end for the contacts store.
//!
//! # Responsibility
//! - Map subcommands onto `ContactService` calls.
//! - Print results as JSON and domain errors as plain text.

use clap::{Parser, Subcommand};
use contacts_core::db::open_db;
use contacts_core::{
    init_logging, Contact, ContactId, ContactPatch, ContactService, ContactsConfig,
    SqliteContactRepository,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "contacts", version, about = "Manage a SQLite contacts store")]
struct Cli {
    /// Database file; overrides CONTACTS_DB_PATH.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all contacts.
    List,
    /// Show one contact.
    Get { id: ContactId },
    /// Add a contact and print its id.
    Add { name: String, phone: String },
    /// Change the name and/or phone of a contact.
    Update {
        id: ContactId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete a contact.
    Delete { id: ContactId },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, String> {
    let config = ContactsConfig::from_env()?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(config.log_level, log_dir)?;
    }

    let db_path = cli.db.unwrap_or(config.db_path);
    let conn = open_db(&db_path).map_err(|err| err.to_string())?;
    let repo = SqliteContactRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let service = ContactService::new(repo);
    info!(
        "event=cli_command module=cli status=start db={}",
        db_path.display()
    );

    let output = match cli.command {
        Command::List => to_json(&service.list_contacts().map_err(|err| err.to_string())?),
        Command::Get { id } => to_json(&service.get_contact(id).map_err(|err| err.to_string())?),
        Command::Add { name, phone } => {
            let id = service
                .create_contact(&Contact::new(name, phone))
                .map_err(|err| err.to_string())?;
            to_json(&serde_json::json!({ "id": id }))
        }
        Command::Update { id, name, phone } => {
            let patch = ContactPatch { id, name, phone };
            to_json(&service.update_contact(&patch).map_err(|err| err.to_string())?)
        }
        Command::Delete { id } => {
            service.delete_contact(id).map_err(|err| err.to_string())?;
            to_json(&serde_json::json!({ "deleted": id }))
        }
    };
    output.map_err(|err| err.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn update_accepts_optional_fields() {
        let cli = Cli::parse_from(["contacts", "--db", "x.db", "update", "3", "--phone", "222"]);
        match cli.command {
            Command::Update { id, name, phone } => {
                assert_eq!(id, 3);
                assert!(name.is_none());
                assert_eq!(phone.as_deref(), Some("222"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_requires_name_and_phone() {
        assert!(Cli::try_parse_from(["contacts", "add", "Ann"]).is_err());
    }
}
