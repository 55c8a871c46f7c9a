use super::Session;
use crate::output::{display_opt, display_time, print_json, print_table};
use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;
use ssdi_core::tracking::NewTrackingEntry;
use ssdi_core::types::{CommunicationType, Priority, Source};
use std::path::Path;

#[derive(Subcommand)]
pub enum TrackingSubcommand {
    /// List logged communications, newest first
    List,
    /// Log a communication
    Add {
        /// email, letter, phone_call, online_message, deadline, appointment
        #[arg(long = "type")]
        kind: CommunicationType,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// social_security, ssa_gov, phone, mail, email
        #[arg(long)]
        source: Source,
        /// high, medium, low
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// When it arrived (RFC 3339 or YYYY-MM-DD; default: now)
        #[arg(long, value_parser = parse_when)]
        received: Option<DateTime<Utc>>,
        /// Requires action by this time (RFC 3339, or YYYY-MM-DD for end of day)
        #[arg(long, value_parser = parse_when)]
        deadline: Option<DateTime<Utc>>,
        /// Mark as requiring action even without a deadline
        #[arg(long)]
        action_required: bool,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Mark an entry's action as done
    Complete { id: i64 },
    /// Delete an entry
    Delete { id: i64 },
}

pub fn run(
    root: &Path,
    user: Option<i64>,
    subcmd: TrackingSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let session = Session::open(root, user)?;
    match subcmd {
        TrackingSubcommand::List => list(&session, json),
        TrackingSubcommand::Add {
            kind,
            title,
            description,
            source,
            priority,
            received,
            deadline,
            action_required,
            notes,
        } => {
            let new = NewTrackingEntry {
                kind,
                title,
                description,
                received_at: received.unwrap_or_else(Utc::now),
                source,
                priority,
                is_action_required: action_required || deadline.is_some(),
                action_deadline: deadline,
                notes,
                attachment_file_name: None,
                attachment_file_size: None,
            };
            add(&session, &new, json)
        }
        TrackingSubcommand::Complete { id } => complete(&session, id, json),
        TrackingSubcommand::Delete { id } => delete(&session, id, json),
    }
}

/// RFC 3339, or a bare date meaning the last second of that day (UTC).
fn parse_when(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("expected RFC 3339 or YYYY-MM-DD, got '{raw}'"))
}

fn list(session: &Session, json: bool) -> anyhow::Result<()> {
    let entries = session.db.list_tracking(session.user_id)?;
    if json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("No communications logged.");
        return Ok(());
    }
    let rows = entries
        .iter()
        .map(|e| {
            let state = if e.action_completed_at.is_some() {
                "done"
            } else if e.is_action_required {
                "action required"
            } else {
                ""
            };
            vec![
                e.id.to_string(),
                display_time(e.received_at),
                e.kind.to_string(),
                e.priority.to_string(),
                e.title.clone(),
                display_opt(e.action_deadline.map(display_time)),
                state.to_string(),
            ]
        })
        .collect();
    print_table(
        &["ID", "RECEIVED", "TYPE", "PRIORITY", "TITLE", "DEADLINE", "STATE"],
        rows,
    );
    Ok(())
}

fn add(session: &Session, new: &NewTrackingEntry, json: bool) -> anyhow::Result<()> {
    let entry = session
        .db
        .create_tracking(session.user_id, new, Utc::now())
        .context("failed to log communication")?;
    if json {
        print_json(&entry)?;
    } else {
        println!("Logged [{}]: {}", entry.id, entry.title);
    }
    Ok(())
}

fn complete(session: &Session, id: i64, json: bool) -> anyhow::Result<()> {
    let entry = session
        .db
        .mark_tracking_complete(id, session.user_id, Utc::now())?;
    if json {
        print_json(&entry)?;
    } else {
        println!("Completed [{}]: {}", entry.id, entry.title);
    }
    Ok(())
}

fn delete(session: &Session, id: i64, json: bool) -> anyhow::Result<()> {
    session.db.delete_tracking(id, session.user_id)?;
    if json {
        print_json(&serde_json::json!({ "id": id, "deleted": true }))?;
    } else {
        println!("Deleted [{id}]");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bare_date_is_end_of_day() {
        assert_eq!(
            parse_when("2024-03-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn rfc3339_is_converted_to_utc() {
        assert_eq!(
            parse_when("2024-03-15T09:00:00-05:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 15, 14, 0, 0).unwrap()
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_when("next tuesday").is_err());
    }
}
