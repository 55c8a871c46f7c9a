use serde::Serialize;

use crate::db::Database;
use crate::error::Result;
use crate::section::Section;
use crate::types::SectionStatus;

/// Section counts by status for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub total: u32,
    pub complete: u32,
    pub in_progress: u32,
    pub needs_attention: u32,
    /// `complete / total` as a whole percent, rounded half up.
    pub percentage: u32,
}

impl Progress {
    pub fn from_sections(sections: &[Section]) -> Self {
        let mut p = Progress::default();
        for s in sections {
            p.total += 1;
            match s.status {
                SectionStatus::Complete => p.complete += 1,
                SectionStatus::InProgress => p.in_progress += 1,
                SectionStatus::NeedsAttention => p.needs_attention += 1,
            }
        }
        if p.total > 0 {
            p.percentage = (200 * p.complete + p.total) / (2 * p.total);
        }
        p
    }
}

impl Database {
    pub fn progress(&self, user_id: i64) -> Result<Progress> {
        Ok(Progress::from_sections(&self.list_sections(user_id)?))
    }
}
