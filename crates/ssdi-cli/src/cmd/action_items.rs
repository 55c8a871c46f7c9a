use super::Session;
use crate::output::{display_opt, display_time, print_json, print_table};
use ssdi_core::action_items::{self, ActionItem, RECENCY_WINDOW_DAYS};
use ssdi_core::clock::SystemClock;
use std::path::Path;

pub fn run(root: &Path, user: Option<i64>, json: bool) -> anyhow::Result<()> {
    let session = Session::open(root, user)?;
    let items = action_items::for_user(&session.db, session.user_id, &SystemClock)?;

    if json {
        return print_json(&items);
    }

    println!("Needs attention ({})", items.needs_attention.len());
    if items.needs_attention.is_empty() {
        println!("  nothing outstanding");
    } else {
        let rows = items.needs_attention.iter().map(attention_row).collect();
        print_table(&["TYPE", "ID", "TITLE", "DEADLINE", "WHERE"], rows);
    }

    println!();
    println!(
        "Completed in the last {RECENCY_WINDOW_DAYS} days ({})",
        items.completed.len()
    );
    if !items.completed.is_empty() {
        let rows = items
            .completed
            .iter()
            .map(|item| {
                vec![
                    item.kind().to_string(),
                    item.id().to_string(),
                    item.title().to_string(),
                    display_opt(item.completed_at().map(display_time)),
                ]
            })
            .collect();
        print_table(&["TYPE", "ID", "TITLE", "COMPLETED"], rows);
    }
    Ok(())
}

fn attention_row(item: &ActionItem) -> Vec<String> {
    let mut deadline = display_opt(item.deadline().map(display_time));
    if item.is_overdue() {
        deadline.push_str(" OVERDUE");
    }
    let place = match item {
        ActionItem::MissingDocument(m) => m.section_name.clone(),
        _ => "-".to_string(),
    };
    vec![
        item.kind().to_string(),
        item.id().to_string(),
        item.title().to_string(),
        deadline,
        place,
    ]
}
