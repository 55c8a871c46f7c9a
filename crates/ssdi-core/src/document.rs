use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::db::{enum_col, fmt_opt_time, fmt_time, opt_time_col, Database};
use crate::error::{Result, TrackerError};
use crate::paths::validate_required;
use crate::types::{DocumentCategory, DocumentStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub section_id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub status: DocumentStatus,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub contact_info: Option<String>,
    pub notes: Option<String>,
    pub category: DocumentCategory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
    /// Ignored when `file_name` is set: a document with a file is uploaded.
    #[serde(default)]
    pub status: Option<DocumentStatus>,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub category: DocumentCategory,
}

impl NewDocument {
    fn resolved_status(&self) -> DocumentStatus {
        if self.file_name.is_some() {
            DocumentStatus::Uploaded
        } else {
            self.status.unwrap_or(DocumentStatus::Pending)
        }
    }
}

/// A missing document together with the name of the section it belongs to.
#[derive(Debug, Clone)]
pub struct MissingDocumentRow {
    pub document: Document,
    pub section_name: String,
}

const DOCUMENT_COLUMNS: &str = "d.id, d.section_id, d.user_id, d.name, d.description, \
     d.file_name, d.file_size, d.status, d.uploaded_at, d.contact_info, d.notes, d.category";

fn parse_document_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Document> {
    Ok(Document {
        id: row.get(0)?,
        section_id: row.get(1)?,
        user_id: row.get(2)?,
        name: row.get(3)?,
        description: row.get(4)?,
        file_name: row.get(5)?,
        file_size: row.get(6)?,
        status: enum_col(row, 7)?,
        uploaded_at: opt_time_col(row, 8)?,
        contact_info: row.get(9)?,
        notes: row.get(10)?,
        category: enum_col(row, 11)?,
    })
}

impl Database {
    /// Documents of a section owned by `user_id`.
    pub fn list_documents(&self, section_id: i64, user_id: i64) -> Result<Vec<Document>> {
        // Ownership is checked first so a foreign section is an error, not an empty list.
        self.get_section(section_id, user_id)?;
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents d WHERE d.section_id = ?1 ORDER BY d.id"
        ))?;
        let rows = stmt.query_map([section_id], parse_document_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get_document(&self, id: i64, user_id: i64) -> Result<Document> {
        let conn = self.conn()?;
        conn.query_row(
            &format!(
                "SELECT {DOCUMENT_COLUMNS} FROM documents d
                 JOIN sections s ON s.id = d.section_id
                 WHERE d.id = ?1 AND s.user_id = ?2"
            ),
            params![id, user_id],
            parse_document_row,
        )
        .optional()?
        .ok_or(TrackerError::DocumentNotFound(id))
    }

    /// Create a document in a section owned by `user_id`.
    ///
    /// The owning user is taken from the section. `uploaded_at` is stamped
    /// with `now` when the resolved status is `uploaded`.
    pub fn create_document(
        &self,
        section_id: i64,
        user_id: i64,
        new: &NewDocument,
        now: DateTime<Utc>,
    ) -> Result<Document> {
        validate_required("name", &new.name)?;
        let section = self.get_section(section_id, user_id)?;
        let status = new.resolved_status();
        let uploaded_at = (status == DocumentStatus::Uploaded).then_some(now);

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO documents (
               section_id, user_id, name, description, file_name, file_size,
               status, uploaded_at, contact_info, notes, category
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                section.id,
                section.user_id,
                new.name,
                new.description,
                new.file_name,
                new.file_size,
                status.as_str(),
                fmt_opt_time(uploaded_at),
                new.contact_info,
                new.notes,
                new.category.as_str(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        drop(conn);
        self.get_document(id, user_id)
    }

    /// Move a document to `status`. Transitions to `uploaded` restamp
    /// `uploaded_at`; other transitions leave it as is.
    pub fn update_document_status(
        &self,
        id: i64,
        user_id: i64,
        status: DocumentStatus,
        now: DateTime<Utc>,
    ) -> Result<Document> {
        let uploaded_at = (status == DocumentStatus::Uploaded).then(|| fmt_time(now));
        let changed = self.conn()?.execute(
            "UPDATE documents SET status = ?1, uploaded_at = COALESCE(?2, uploaded_at)
             WHERE id = ?3
               AND section_id IN (SELECT id FROM sections WHERE user_id = ?4)",
            params![status.as_str(), uploaded_at, id, user_id],
        )?;
        if changed == 0 {
            return Err(TrackerError::DocumentNotFound(id));
        }
        self.get_document(id, user_id)
    }

    pub fn delete_document(&self, id: i64, user_id: i64) -> Result<()> {
        let changed = self.conn()?.execute(
            "DELETE FROM documents
             WHERE id = ?1
               AND section_id IN (SELECT id FROM sections WHERE user_id = ?2)",
            params![id, user_id],
        )?;
        if changed == 0 {
            return Err(TrackerError::DocumentNotFound(id));
        }
        Ok(())
    }

    /// Missing documents in sections owned by `user_id`.
    pub fn list_missing_documents(&self, user_id: i64) -> Result<Vec<MissingDocumentRow>> {
        query_missing_documents(&*self.conn()?, user_id)
    }

    /// Uploaded documents in sections owned by `user_id` with
    /// `uploaded_at` strictly after `since`.
    pub fn list_uploaded_since(&self, user_id: i64, since: DateTime<Utc>) -> Result<Vec<Document>> {
        query_uploaded_since(&*self.conn()?, user_id, since)
    }
}

pub(crate) fn query_missing_documents(
    conn: &Connection,
    user_id: i64,
) -> Result<Vec<MissingDocumentRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DOCUMENT_COLUMNS}, s.name FROM documents d
         JOIN sections s ON s.id = d.section_id
         WHERE d.status = 'missing' AND s.user_id = ?1
         ORDER BY s.sort_order, d.id"
    ))?;
    let rows = stmt.query_map([user_id], |row| {
        Ok(MissingDocumentRow {
            document: parse_document_row(row)?,
            section_name: row.get(12)?,
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub(crate) fn query_uploaded_since(
    conn: &Connection,
    user_id: i64,
    since: DateTime<Utc>,
) -> Result<Vec<Document>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DOCUMENT_COLUMNS} FROM documents d
         JOIN sections s ON s.id = d.section_id
         WHERE d.status = 'uploaded'
           AND s.user_id = ?1
           AND d.uploaded_at IS NOT NULL
           AND d.uploaded_at > ?2
         ORDER BY d.id"
    ))?;
    let rows = stmt.query_map(params![user_id, fmt_time(since)], parse_document_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::NewSection;
    use crate::types::SectionStatus;
    use crate::user::NewUser;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap()
    }

    fn setup() -> (Database, i64, i64) {
        let db = Database::open_in_memory().unwrap();
        let user = db
            .create_user(
                &NewUser {
                    username: "john.smith".into(),
                    ..Default::default()
                },
                now(),
            )
            .unwrap();
        let section = db
            .create_section(
                user.id,
                &NewSection {
                    name: "Medical Evidence".into(),
                    description: None,
                    status: SectionStatus::InProgress,
                    order: 2,
                },
            )
            .unwrap();
        (db, user.id, section.id)
    }

    fn doc(name: &str, file: Option<&str>, status: Option<DocumentStatus>) -> NewDocument {
        NewDocument {
            name: name.into(),
            description: None,
            file_name: file.map(str::to_string),
            file_size: file.map(|_| 1024),
            status,
            contact_info: None,
            notes: None,
            category: DocumentCategory::Medical,
        }
    }

    #[test]
    fn file_makes_document_uploaded() {
        let (db, user, section) = setup();
        let new = doc("Physician Records", Some("records.pdf"), None);
        let d = db.create_document(section, user, &new, now()).unwrap();
        assert_eq!(d.status, DocumentStatus::Uploaded);
        assert_eq!(d.uploaded_at, Some(now()));

        let loaded = db.get_document(d.id, user).unwrap();
        assert_eq!(loaded.uploaded_at, Some(now()));
        assert_eq!(loaded.file_size, Some(1024));
    }

    #[test]
    fn upload_time_is_returned_as_stored() {
        let (db, user, section) = setup();
        let precise = now() + chrono::Duration::nanoseconds(987_654_321);
        let new = doc("Physician Records", Some("records.pdf"), None);

        let created = db.create_document(section, user, &new, precise).unwrap();
        let loaded = db.get_document(created.id, user).unwrap();
        assert_eq!(created.uploaded_at, loaded.uploaded_at);
        assert_eq!(
            created.uploaded_at,
            Some(now() + chrono::Duration::milliseconds(987))
        );
    }

    #[test]
    fn no_file_defaults_to_pending() {
        let (db, user, section) = setup();
        let d = db
            .create_document(section, user, &doc("Specialist Reports", None, None), now())
            .unwrap();
        assert_eq!(d.status, DocumentStatus::Pending);
        assert!(d.uploaded_at.is_none());
    }

    #[test]
    fn status_update_to_uploaded_stamps_time() {
        let (db, user, section) = setup();
        let d = db
            .create_document(
                section,
                user,
                &doc("Specialist Reports", None, Some(DocumentStatus::Missing)),
                now(),
            )
            .unwrap();
        let later = now() + chrono::Duration::days(1);

        let updated = db
            .update_document_status(d.id, user, DocumentStatus::Uploaded, later)
            .unwrap();
        assert_eq!(updated.status, DocumentStatus::Uploaded);
        assert_eq!(updated.uploaded_at, Some(later));

        let even_later = later + chrono::Duration::days(1);
        let pending = db
            .update_document_status(d.id, user, DocumentStatus::Pending, even_later)
            .unwrap();
        assert_eq!(pending.uploaded_at, Some(later));
    }

    #[test]
    fn foreign_documents_are_hidden() {
        let (db, user, section) = setup();
        let other = db
            .create_user(
                &NewUser {
                    username: "other".into(),
                    ..Default::default()
                },
                now(),
            )
            .unwrap();
        let d = db
            .create_document(section, user, &doc("Denial Letter", None, None), now())
            .unwrap();

        assert!(matches!(
            db.get_document(d.id, other.id),
            Err(TrackerError::DocumentNotFound(_))
        ));
        assert!(matches!(
            db.delete_document(d.id, other.id),
            Err(TrackerError::DocumentNotFound(_))
        ));
        assert!(matches!(
            db.list_documents(section, other.id),
            Err(TrackerError::SectionNotFound(_))
        ));
        assert!(matches!(
            db.create_document(section, other.id, &doc("x", None, None), now()),
            Err(TrackerError::SectionNotFound(_))
        ));
        db.delete_document(d.id, user).unwrap();
        assert!(db.list_documents(section, user).unwrap().is_empty());
    }

    #[test]
    fn missing_documents_carry_section_name() {
        let (db, user, section) = setup();
        db.create_document(
            section,
            user,
            &doc("Specialist Reports", None, Some(DocumentStatus::Missing)),
            now(),
        )
        .unwrap();
        db.create_document(section, user, &doc("Records", Some("r.pdf"), None), now())
            .unwrap();

        let missing = db.list_missing_documents(user).unwrap();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].document.name, "Specialist Reports");
        assert_eq!(missing[0].section_name, "Medical Evidence");
    }

    #[test]
    fn uploaded_since_is_strict() {
        let (db, user, section) = setup();
        db.create_document(section, user, &doc("Records", Some("r.pdf"), None), now())
            .unwrap();

        assert_eq!(
            db.list_uploaded_since(user, now() - chrono::Duration::seconds(1))
                .unwrap()
                .len(),
            1
        );
        assert!(db.list_uploaded_since(user, now()).unwrap().is_empty());
    }
}
