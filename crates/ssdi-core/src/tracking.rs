//! Communication log with the SSA: letters, calls, deadlines, appointments.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::db::{
    enum_col, ensure_user, fmt_opt_time, fmt_time, opt_time_col, time_col, Database,
};
use crate::error::{Result, TrackerError};
use crate::paths::validate_required;
use crate::types::{CommunicationType, Priority, Source};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEntry {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: CommunicationType,
    pub title: String,
    pub description: String,
    pub received_at: DateTime<Utc>,
    pub source: Source,
    pub priority: Priority,
    pub is_action_required: bool,
    pub action_deadline: Option<DateTime<Utc>>,
    pub action_completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub attachment_file_name: Option<String>,
    pub attachment_file_size: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl TrackingEntry {
    /// Required and not yet completed.
    pub fn is_open_action(&self) -> bool {
        self.is_action_required && self.action_completed_at.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrackingEntry {
    #[serde(rename = "type")]
    pub kind: CommunicationType,
    pub title: String,
    pub description: String,
    pub received_at: DateTime<Utc>,
    pub source: Source,
    pub priority: Priority,
    #[serde(default)]
    pub is_action_required: bool,
    #[serde(default)]
    pub action_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub attachment_file_name: Option<String>,
    #[serde(default)]
    pub attachment_file_size: Option<i64>,
}

const TRACKING_COLUMNS: &str = "id, user_id, type, title, description, received_at, source, \
     priority, is_action_required, action_deadline, action_completed_at, notes, \
     attachment_file_name, attachment_file_size, created_at";

fn parse_tracking_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TrackingEntry> {
    Ok(TrackingEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        kind: enum_col(row, 2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        received_at: time_col(row, 5)?,
        source: enum_col(row, 6)?,
        priority: enum_col(row, 7)?,
        is_action_required: row.get(8)?,
        action_deadline: opt_time_col(row, 9)?,
        action_completed_at: opt_time_col(row, 10)?,
        notes: row.get(11)?,
        attachment_file_name: row.get(12)?,
        attachment_file_size: row.get(13)?,
        created_at: time_col(row, 14)?,
    })
}

impl Database {
    /// Entries owned by `user_id`, most recently received first.
    pub fn list_tracking(&self, user_id: i64) -> Result<Vec<TrackingEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {TRACKING_COLUMNS} FROM retirement_tracking
             WHERE user_id = ?1 ORDER BY received_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map([user_id], parse_tracking_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get_tracking(&self, id: i64, user_id: i64) -> Result<TrackingEntry> {
        let conn = self.conn()?;
        conn.query_row(
            &format!(
                "SELECT {TRACKING_COLUMNS} FROM retirement_tracking
                 WHERE id = ?1 AND user_id = ?2"
            ),
            params![id, user_id],
            parse_tracking_row,
        )
        .optional()?
        .ok_or(TrackerError::TrackingNotFound(id))
    }

    pub fn create_tracking(
        &self,
        user_id: i64,
        new: &NewTrackingEntry,
        now: DateTime<Utc>,
    ) -> Result<TrackingEntry> {
        validate_required("title", &new.title)?;
        if new.description.trim().is_empty() {
            return Err(TrackerError::Validation("description is required".into()));
        }
        let conn = self.conn()?;
        ensure_user(&conn, user_id)?;
        conn.execute(
            "INSERT INTO retirement_tracking (
               user_id, type, title, description, received_at, source, priority,
               is_action_required, action_deadline, action_completed_at, notes,
               attachment_file_name, attachment_file_size, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL, ?10, ?11, ?12, ?13)",
            params![
                user_id,
                new.kind.as_str(),
                new.title,
                new.description,
                fmt_time(new.received_at),
                new.source.as_str(),
                new.priority.as_str(),
                new.is_action_required,
                fmt_opt_time(new.action_deadline),
                new.notes,
                new.attachment_file_name,
                new.attachment_file_size,
                fmt_time(now),
            ],
        )?;

        let id = conn.last_insert_rowid();
        drop(conn);
        self.get_tracking(id, user_id)
    }

    pub fn delete_tracking(&self, id: i64, user_id: i64) -> Result<()> {
        let changed = self.conn()?.execute(
            "DELETE FROM retirement_tracking WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if changed == 0 {
            return Err(TrackerError::TrackingNotFound(id));
        }
        Ok(())
    }

    /// Mark the entry `id` owned by `user_id` as done at `now`.
    ///
    /// Clears `is_action_required` and stamps `action_completed_at`. An entry
    /// that already carries a completion time keeps it, so repeating the call
    /// does not move the entry within the recency window. Missing and foreign
    /// entries both fail with [`TrackerError::NotFoundOrForbidden`] and are
    /// left untouched.
    pub fn mark_tracking_complete(
        &self,
        id: i64,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<TrackingEntry> {
        let changed = self.conn()?.execute(
            "UPDATE retirement_tracking
             SET is_action_required = 0,
                 action_completed_at = COALESCE(action_completed_at, ?1)
             WHERE id = ?2 AND user_id = ?3",
            params![fmt_time(now), id, user_id],
        )?;
        if changed == 0 {
            tracing::warn!(id, user_id, "refused to complete tracking entry");
            return Err(TrackerError::NotFoundOrForbidden(id));
        }
        self.get_tracking(id, user_id)
    }

    /// Entries owned by `user_id` that still require action.
    pub fn list_required_actions(&self, user_id: i64) -> Result<Vec<TrackingEntry>> {
        query_required_actions(&*self.conn()?, user_id)
    }

    /// Entries owned by `user_id` completed strictly after `since`.
    pub fn list_completed_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<TrackingEntry>> {
        query_completed_since(&*self.conn()?, user_id, since)
    }
}

pub(crate) fn query_required_actions(
    conn: &Connection,
    user_id: i64,
) -> Result<Vec<TrackingEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TRACKING_COLUMNS} FROM retirement_tracking
         WHERE user_id = ?1 AND is_action_required = 1 AND action_completed_at IS NULL
         ORDER BY id"
    ))?;
    let rows = stmt.query_map([user_id], parse_tracking_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub(crate) fn query_completed_since(
    conn: &Connection,
    user_id: i64,
    since: DateTime<Utc>,
) -> Result<Vec<TrackingEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TRACKING_COLUMNS} FROM retirement_tracking
         WHERE user_id = ?1
           AND action_completed_at IS NOT NULL
           AND action_completed_at > ?2
         ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![user_id, fmt_time(since)], parse_tracking_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::NewUser;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn user(db: &Database, name: &str) -> i64 {
        db.create_user(
            &NewUser {
                username: name.into(),
                ..Default::default()
            },
            at(2024, 1, 1),
        )
        .unwrap()
        .id
    }

    fn entry(
        title: &str,
        received: DateTime<Utc>,
        deadline: Option<DateTime<Utc>>,
    ) -> NewTrackingEntry {
        NewTrackingEntry {
            kind: CommunicationType::Letter,
            title: title.into(),
            description: "Request for additional documentation".into(),
            received_at: received,
            source: Source::Mail,
            priority: Priority::High,
            is_action_required: deadline.is_some(),
            action_deadline: deadline,
            notes: None,
            attachment_file_name: None,
            attachment_file_size: None,
        }
    }

    fn open_action(db: &Database, owner: i64, title: &str) -> TrackingEntry {
        db.create_tracking(
            owner,
            &entry(title, at(2024, 2, 20), Some(at(2024, 3, 15))),
            at(2024, 2, 20),
        )
        .unwrap()
    }

    #[test]
    fn list_is_newest_first_and_scoped() {
        let db = Database::open_in_memory().unwrap();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");
        let now = at(2024, 3, 1);
        db.create_tracking(alice, &entry("older", at(2024, 1, 15), None), now)
            .unwrap();
        db.create_tracking(alice, &entry("newer", at(2024, 2, 15), None), now)
            .unwrap();
        db.create_tracking(bob, &entry("bob's", at(2024, 2, 20), None), now)
            .unwrap();

        let titles: Vec<String> = db
            .list_tracking(alice)
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["newer", "older"]);
    }

    #[test]
    fn blank_title_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let alice = user(&db, "alice");
        let mut new = entry("  ", at(2024, 1, 15), None);
        assert!(matches!(
            db.create_tracking(alice, &new, at(2024, 3, 1)),
            Err(TrackerError::Validation(_))
        ));
        new.title = "ok".into();
        new.description = String::new();
        assert!(matches!(
            db.create_tracking(alice, &new, at(2024, 3, 1)),
            Err(TrackerError::Validation(_))
        ));
    }

    #[test]
    fn create_for_unknown_user_is_user_not_found() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            db.create_tracking(99, &entry("Call", at(2024, 2, 15), None), at(2024, 3, 1)),
            Err(TrackerError::UserNotFound(99))
        ));
    }

    #[test]
    fn created_entry_matches_stored_row() {
        let db = Database::open_in_memory().unwrap();
        let alice = user(&db, "alice");
        let precise = at(2024, 3, 1) + chrono::Duration::nanoseconds(123_456_789);

        let created = db
            .create_tracking(alice, &entry("Call", precise, Some(precise)), precise)
            .unwrap();
        let stored = db.get_tracking(created.id, alice).unwrap();

        assert_eq!(created.created_at, stored.created_at);
        assert_eq!(created.received_at, stored.received_at);
        assert_eq!(created.action_deadline, stored.action_deadline);
        assert_eq!(
            created.created_at,
            at(2024, 3, 1) + chrono::Duration::milliseconds(123)
        );
    }

    #[test]
    fn mark_complete_moves_entry_out_of_required() {
        let db = Database::open_in_memory().unwrap();
        let alice = user(&db, "alice");
        let t = open_action(&db, alice, "Send W-2s");
        assert!(t.is_open_action());
        assert_eq!(db.list_required_actions(alice).unwrap().len(), 1);

        let done = db
            .mark_tracking_complete(t.id, alice, at(2024, 3, 5))
            .unwrap();
        assert!(!done.is_action_required);
        assert_eq!(done.action_completed_at, Some(at(2024, 3, 5)));
        assert!(db.list_required_actions(alice).unwrap().is_empty());
        assert_eq!(
            db.list_completed_since(alice, at(2024, 3, 1)).unwrap().len(),
            1
        );
    }

    #[test]
    fn mark_complete_twice_keeps_first_timestamp() {
        let db = Database::open_in_memory().unwrap();
        let alice = user(&db, "alice");
        let t = open_action(&db, alice, "Exam");

        db.mark_tracking_complete(t.id, alice, at(2024, 3, 5))
            .unwrap();
        let again = db
            .mark_tracking_complete(t.id, alice, at(2024, 3, 9))
            .unwrap();
        assert_eq!(again.action_completed_at, Some(at(2024, 3, 5)));
    }

    #[test]
    fn mark_complete_of_foreign_entry_is_refused() {
        let db = Database::open_in_memory().unwrap();
        let owner = user(&db, "owner");
        let caller = user(&db, "caller");
        let t = open_action(&db, owner, "Exam");

        assert!(matches!(
            db.mark_tracking_complete(t.id, caller, at(2024, 3, 5)),
            Err(TrackerError::NotFoundOrForbidden(id)) if id == t.id
        ));
        assert!(matches!(
            db.mark_tracking_complete(9999, caller, at(2024, 3, 5)),
            Err(TrackerError::NotFoundOrForbidden(9999))
        ));

        let unchanged = db.get_tracking(t.id, owner).unwrap();
        assert!(unchanged.is_open_action());
        assert!(unchanged.action_completed_at.is_none());
    }

    #[test]
    fn delete_is_scoped() {
        let db = Database::open_in_memory().unwrap();
        let owner = user(&db, "owner");
        let caller = user(&db, "caller");
        let t = db
            .create_tracking(owner, &entry("Call", at(2024, 2, 15), None), at(2024, 2, 15))
            .unwrap();

        assert!(matches!(
            db.delete_tracking(t.id, caller),
            Err(TrackerError::TrackingNotFound(_))
        ));
        db.delete_tracking(t.id, owner).unwrap();
        assert!(matches!(
            db.get_tracking(t.id, owner),
            Err(TrackerError::TrackingNotFound(_))
        ));
    }
}
