use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::db::{fmt_time, time_col, Database};
use crate::error::{Result, TrackerError};
use crate::paths::validate_required;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    /// SSA application reference, e.g. `SS-2024-001234`.
    pub application_id: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

const USER_COLUMNS: &str = "id, username, name, application_id, email, created_at";

fn parse_user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        name: row.get(2)?,
        application_id: row.get(3)?,
        email: row.get(4)?,
        created_at: time_col(row, 5)?,
    })
}

impl Database {
    pub fn create_user(&self, new: &NewUser, now: DateTime<Utc>) -> Result<User> {
        validate_required("username", &new.username)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (username, name, application_id, email, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.username,
                new.name,
                new.application_id,
                new.email,
                fmt_time(now)
            ],
        )
        .map_err(|e| match e.sqlite_error_code() {
            Some(rusqlite::ErrorCode::ConstraintViolation) => TrackerError::Validation(format!(
                "username '{}' is already taken",
                new.username
            )),
            _ => e.into(),
        })?;
        let id = conn.last_insert_rowid();
        drop(conn);
        self.get_user(id)
    }

    pub fn find_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                [id],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }

    pub fn get_user(&self, id: i64) -> Result<User> {
        self.find_user(id)?.ok_or(TrackerError::UserNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn create_and_get_user() {
        let db = Database::open_in_memory().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let user = db
            .create_user(
                &NewUser {
                    username: "john.smith".into(),
                    name: Some("John Smith".into()),
                    application_id: Some("SS-2024-001234".into()),
                    email: None,
                },
                now,
            )
            .unwrap();

        let loaded = db.get_user(user.id).unwrap();
        assert_eq!(loaded.username, "john.smith");
        assert_eq!(loaded.application_id.as_deref(), Some("SS-2024-001234"));
        assert_eq!(loaded.created_at, now);
    }

    #[test]
    fn missing_user_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.find_user(42).unwrap().is_none());
        assert!(matches!(db.get_user(42), Err(TrackerError::UserNotFound(42))));
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let new = NewUser {
            username: "dup".into(),
            ..Default::default()
        };
        db.create_user(&new, Utc::now()).unwrap();
        assert!(matches!(
            db.create_user(&new, Utc::now()),
            Err(TrackerError::Validation(_))
        ));
    }
}
