use std::path::Path;
use std::sync::Arc;

use ssdi_core::clock::{Clock, SystemClock};
use ssdi_core::config::Config;
use ssdi_core::Database;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub clock: Arc<dyn Clock>,
    /// Caller used when a request carries no `X-User-Id` header.
    pub default_user_id: i64,
}

impl AppState {
    pub fn new(db: Database, clock: Arc<dyn Clock>, default_user_id: i64) -> Self {
        Self {
            db: Arc::new(db),
            clock,
            default_user_id,
        }
    }

    /// Open the store configured under `root` with the wall clock.
    pub fn open(root: &Path) -> ssdi_core::Result<Self> {
        let config = Config::load(root)?;
        let db = Database::open(&config.database_path(root))?;
        Ok(Self::new(
            db,
            Arc::new(SystemClock),
            config.server.default_user_id,
        ))
    }
}
