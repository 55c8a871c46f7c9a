use super::Session;
use crate::output::{display_opt, display_time, print_json, print_table};
use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use ssdi_core::document::NewDocument;
use ssdi_core::types::{DocumentCategory, DocumentStatus};
use std::path::Path;

#[derive(Subcommand)]
pub enum DocumentSubcommand {
    /// List documents in a section
    List { section_id: i64 },
    /// Record a document in a section
    Add {
        section_id: i64,
        #[arg(long)]
        name: String,
        /// personal, medical, legal, employment, government
        #[arg(long)]
        category: DocumentCategory,
        /// uploaded, pending, missing (default: pending, or uploaded with --file-name)
        #[arg(long)]
        status: Option<DocumentStatus>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        file_name: Option<String>,
        #[arg(long)]
        file_size: Option<i64>,
        #[arg(long)]
        contact_info: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Set a document's status
    Status { id: i64, status: DocumentStatus },
    /// Delete a document
    Delete { id: i64 },
}

pub fn run(
    root: &Path,
    user: Option<i64>,
    subcmd: DocumentSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let session = Session::open(root, user)?;
    match subcmd {
        DocumentSubcommand::List { section_id } => list(&session, section_id, json),
        DocumentSubcommand::Add {
            section_id,
            name,
            category,
            status,
            description,
            file_name,
            file_size,
            contact_info,
            notes,
        } => {
            let new = NewDocument {
                name,
                description,
                file_name,
                file_size,
                status,
                contact_info,
                notes,
                category,
            };
            let doc = session
                .db
                .create_document(section_id, session.user_id, &new, Utc::now())
                .context("failed to record document")?;
            if json {
                print_json(&doc)?;
            } else {
                println!("Added document [{}]: {} ({})", doc.id, doc.name, doc.status);
            }
            Ok(())
        }
        DocumentSubcommand::Status { id, status } => {
            let doc = session
                .db
                .update_document_status(id, session.user_id, status, Utc::now())?;
            if json {
                print_json(&doc)?;
            } else {
                println!("Document [{}] {} is now {}", doc.id, doc.name, doc.status);
            }
            Ok(())
        }
        DocumentSubcommand::Delete { id } => {
            session.db.delete_document(id, session.user_id)?;
            if json {
                print_json(&serde_json::json!({ "id": id, "deleted": true }))?;
            } else {
                println!("Deleted document [{id}]");
            }
            Ok(())
        }
    }
}

fn list(session: &Session, section_id: i64, json: bool) -> anyhow::Result<()> {
    let docs = session.db.list_documents(section_id, session.user_id)?;
    if json {
        return print_json(&docs);
    }
    if docs.is_empty() {
        println!("No documents in section {section_id}.");
        return Ok(());
    }
    let rows = docs
        .into_iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                d.name,
                d.status.to_string(),
                d.category.to_string(),
                display_opt(d.file_name),
                display_opt(d.uploaded_at.map(display_time)),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "STATUS", "CATEGORY", "FILE", "UPLOADED"], rows);
    Ok(())
}
