use super::Session;
use crate::output::print_json;
use std::path::Path;

pub fn run(root: &Path, user: Option<i64>, json: bool) -> anyhow::Result<()> {
    let session = Session::open(root, user)?;
    let p = session.db.progress(session.user_id)?;
    if json {
        return print_json(&p);
    }
    println!(
        "{}% complete ({} of {} sections)",
        p.percentage, p.complete, p.total
    );
    println!("  in progress:     {}", p.in_progress);
    println!("  needs attention: {}", p.needs_attention);
    Ok(())
}
