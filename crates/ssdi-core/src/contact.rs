use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::db::{ensure_user, fmt_time, time_col, Database};
use crate::error::{Result, TrackerError};
use crate::paths::{validate_email, validate_required};

/// Someone involved in the claim: caseworker, physician's office, attorney.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub role: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    pub email: String,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

const CONTACT_COLUMNS: &str = "id, user_id, name, role, email, created_at";

fn parse_contact_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        role: row.get(3)?,
        email: row.get(4)?,
        created_at: time_col(row, 5)?,
    })
}

impl Database {
    /// Contacts owned by `user_id`, newest first.
    pub fn list_contacts(&self, user_id: i64) -> Result<Vec<Contact>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts
             WHERE user_id = ?1 ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map([user_id], parse_contact_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get_contact(&self, id: i64, user_id: i64) -> Result<Contact> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1 AND user_id = ?2"),
            params![id, user_id],
            parse_contact_row,
        )
        .optional()?
        .ok_or(TrackerError::ContactNotFound(id))
    }

    pub fn create_contact(
        &self,
        user_id: i64,
        new: &NewContact,
        now: DateTime<Utc>,
    ) -> Result<Contact> {
        validate_required("name", &new.name)?;
        validate_email(&new.email)?;
        let conn = self.conn()?;
        ensure_user(&conn, user_id)?;
        conn.execute(
            "INSERT INTO contacts (user_id, name, role, email, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user_id, new.name, new.role, new.email, fmt_time(now)],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);
        self.get_contact(id, user_id)
    }

    pub fn update_contact(&self, id: i64, user_id: i64, update: &ContactUpdate) -> Result<Contact> {
        if let Some(name) = &update.name {
            validate_required("name", name)?;
        }
        if let Some(email) = &update.email {
            validate_email(email)?;
        }
        let changed = self.conn()?.execute(
            "UPDATE contacts
             SET name = COALESCE(?1, name),
                 role = COALESCE(?2, role),
                 email = COALESCE(?3, email)
             WHERE id = ?4 AND user_id = ?5",
            params![update.name, update.role, update.email, id, user_id],
        )?;
        if changed == 0 {
            return Err(TrackerError::ContactNotFound(id));
        }
        self.get_contact(id, user_id)
    }

    pub fn delete_contact(&self, id: i64, user_id: i64) -> Result<()> {
        let changed = self.conn()?.execute(
            "DELETE FROM contacts WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if changed == 0 {
            return Err(TrackerError::ContactNotFound(id));
        }
        Ok(())
    }
}
