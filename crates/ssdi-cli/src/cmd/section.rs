use super::Session;
use crate::output::{display_opt, print_json, print_table};
use clap::Subcommand;
use ssdi_core::types::SectionStatus;
use std::path::Path;

#[derive(Subcommand)]
pub enum SectionSubcommand {
    /// List application sections in display order
    List,
    /// Set a section's status (complete, in-progress, needs-attention)
    Status { id: i64, status: SectionStatus },
}

pub fn run(
    root: &Path,
    user: Option<i64>,
    subcmd: SectionSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let session = Session::open(root, user)?;
    match subcmd {
        SectionSubcommand::List => {
            let sections = session.db.list_sections(session.user_id)?;
            if json {
                return print_json(&sections);
            }
            if sections.is_empty() {
                println!("No sections.");
                return Ok(());
            }
            let rows = sections
                .into_iter()
                .map(|s| {
                    vec![
                        s.id.to_string(),
                        s.name,
                        s.status.to_string(),
                        display_opt(s.description),
                    ]
                })
                .collect();
            print_table(&["ID", "NAME", "STATUS", "DESCRIPTION"], rows);
            Ok(())
        }
        SectionSubcommand::Status { id, status } => {
            let section = session
                .db
                .update_section_status(id, session.user_id, status)?;
            if json {
                print_json(&section)?;
            } else {
                println!("Section [{}] {} is now {}", section.id, section.name, section.status);
            }
            Ok(())
        }
    }
}
