use super::Session;
use crate::output::{display_opt, print_json, print_table};
use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use ssdi_core::contact::NewContact;
use std::path::Path;

#[derive(Subcommand)]
pub enum ContactSubcommand {
    /// List contacts, newest first
    List,
    /// Add a contact
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// e.g. "SSA Representative", "Physician"
        #[arg(long)]
        role: Option<String>,
    },
    /// Delete a contact
    Delete { id: i64 },
}

pub fn run(
    root: &Path,
    user: Option<i64>,
    subcmd: ContactSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let session = Session::open(root, user)?;
    match subcmd {
        ContactSubcommand::List => {
            let contacts = session.db.list_contacts(session.user_id)?;
            if json {
                return print_json(&contacts);
            }
            if contacts.is_empty() {
                println!("No contacts.");
                return Ok(());
            }
            let rows = contacts
                .into_iter()
                .map(|c| vec![c.id.to_string(), c.name, display_opt(c.role), c.email])
                .collect();
            print_table(&["ID", "NAME", "ROLE", "EMAIL"], rows);
            Ok(())
        }
        ContactSubcommand::Add { name, email, role } => {
            let contact = session
                .db
                .create_contact(session.user_id, &NewContact { name, role, email }, Utc::now())
                .context("failed to add contact")?;
            if json {
                print_json(&contact)?;
            } else {
                println!("Added contact [{}]: {} <{}>", contact.id, contact.name, contact.email);
            }
            Ok(())
        }
        ContactSubcommand::Delete { id } => {
            session.db.delete_contact(id, session.user_id)?;
            if json {
                print_json(&serde_json::json!({ "id": id, "deleted": true }))?;
            } else {
                println!("Deleted contact [{id}]");
            }
            Ok(())
        }
    }
}
