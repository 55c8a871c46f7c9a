use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::db::{ensure_user, enum_col, Database};
use crate::error::{Result, TrackerError};
use crate::paths::validate_required;
use crate::types::SectionStatus;

/// A grouping of required documents, e.g. "Medical Evidence".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: SectionStatus,
    pub order: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSection {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: SectionStatus,
    pub order: i64,
}

const SECTION_COLUMNS: &str = "id, user_id, name, description, status, sort_order";

fn parse_section_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Section> {
    Ok(Section {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        status: enum_col(row, 4)?,
        order: row.get(5)?,
    })
}

impl Database {
    /// All sections owned by `user_id`, in display order.
    pub fn list_sections(&self, user_id: i64) -> Result<Vec<Section>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SECTION_COLUMNS} FROM sections WHERE user_id = ?1 ORDER BY sort_order, id"
        ))?;
        let rows = stmt.query_map([user_id], parse_section_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// A section owned by `user_id`. Foreign sections report as not found.
    pub fn get_section(&self, id: i64, user_id: i64) -> Result<Section> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {SECTION_COLUMNS} FROM sections WHERE id = ?1 AND user_id = ?2"),
            params![id, user_id],
            parse_section_row,
        )
        .optional()?
        .ok_or(TrackerError::SectionNotFound(id))
    }

    pub fn create_section(&self, user_id: i64, new: &NewSection) -> Result<Section> {
        validate_required("name", &new.name)?;
        let conn = self.conn()?;
        ensure_user(&conn, user_id)?;
        conn.execute(
            "INSERT INTO sections (user_id, name, description, status, sort_order)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user_id,
                new.name,
                new.description,
                new.status.as_str(),
                new.order
            ],
        )?;
        Ok(Section {
            id: conn.last_insert_rowid(),
            user_id,
            name: new.name.clone(),
            description: new.description.clone(),
            status: new.status,
            order: new.order,
        })
    }

    pub fn update_section_status(
        &self,
        id: i64,
        user_id: i64,
        status: SectionStatus,
    ) -> Result<Section> {
        let changed = self.conn()?.execute(
            "UPDATE sections SET status = ?1 WHERE id = ?2 AND user_id = ?3",
            params![status.as_str(), id, user_id],
        )?;
        if changed == 0 {
            return Err(TrackerError::SectionNotFound(id));
        }
        self.get_section(id, user_id)
    }
}
