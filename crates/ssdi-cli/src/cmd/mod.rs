pub mod action_items;
pub mod contact;
pub mod document;
pub mod init;
pub mod progress;
pub mod section;
pub mod serve;
pub mod tracking;

use anyhow::Context;
use ssdi_core::{config::Config, Database};
use std::path::Path;

/// An opened case store and the user commands act for.
pub struct Session {
    pub db: Database,
    pub user_id: i64,
}

impl Session {
    pub fn open(root: &Path, user: Option<i64>) -> anyhow::Result<Self> {
        let config = Config::load(root).context("failed to load .ssdi/config.yaml")?;
        let path = config.database_path(root);
        let db = Database::open(&path)
            .with_context(|| format!("failed to open case store at {}", path.display()))?;
        Ok(Self {
            db,
            user_id: user.unwrap_or(config.server.default_user_id),
        })
    }
}
