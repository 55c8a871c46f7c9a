//! Dashboard action items.
//!
//! Combines missing documents and open tracking entries into a prioritized
//! `needs_attention` list, and recently resolved documents and entries into a
//! `completed` list. Reads go through [`ActionSource`]; classification and
//! ordering are done by [`aggregate`], a pure function of the rows read and
//! the current time.
//!
//! [`Database`] performs the four reads inside one read transaction, so an
//! entry completed mid-request cannot appear in both lists.
//!
//! # Ordering
//!
//! `needs_attention`:
//! 1. overdue before not overdue
//! 2. dated before undated
//! 3. earlier deadline first
//! 4. otherwise source order (missing documents, then tracking entries)
//!
//! `completed`: most recently completed first.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clock::Clock;
use crate::db::Database;
use crate::document::{self, Document, MissingDocumentRow};
use crate::error::Result;
use crate::tracking::{self, TrackingEntry};
use crate::types::DocumentStatus;

/// How long a resolved item stays in the `completed` list.
pub const RECENCY_WINDOW_DAYS: i64 = 7;

/// Completed items must be strictly newer than this to be listed.
pub fn recency_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - chrono::Duration::days(RECENCY_WINDOW_DAYS)
}

// ---------------------------------------------------------------------------
// ActionItem
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MissingDocument {
    pub id: i64,
    pub title: String,
    pub section_id: i64,
    pub section_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequiredAction {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub deadline: Option<DateTime<Utc>>,
    pub is_overdue: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletedItem {
    pub id: i64,
    pub title: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionItem {
    MissingDocument(MissingDocument),
    RequiredAction(RequiredAction),
    CompletedDocument(CompletedItem),
    CompletedAction(CompletedItem),
}

impl ActionItem {
    pub fn kind(&self) -> &'static str {
        match self {
            ActionItem::MissingDocument(_) => "missing_document",
            ActionItem::RequiredAction(_) => "required_action",
            ActionItem::CompletedDocument(_) => "completed_document",
            ActionItem::CompletedAction(_) => "completed_action",
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            ActionItem::MissingDocument(m) => m.id,
            ActionItem::RequiredAction(r) => r.id,
            ActionItem::CompletedDocument(c) | ActionItem::CompletedAction(c) => c.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ActionItem::MissingDocument(m) => &m.title,
            ActionItem::RequiredAction(r) => &r.title,
            ActionItem::CompletedDocument(c) | ActionItem::CompletedAction(c) => &c.title,
        }
    }

    /// Missing documents have no due date.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        match self {
            ActionItem::RequiredAction(r) => r.deadline,
            _ => None,
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, ActionItem::RequiredAction(r) if r.is_overdue)
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            ActionItem::CompletedDocument(c) | ActionItem::CompletedAction(c) => {
                Some(c.completed_at)
            }
            _ => None,
        }
    }
}

/// Flat JSON shape: a `type` tag plus the fields of the variant.
/// Needs-attention items always carry `deadline` (possibly null) and `isOverdue`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionItemWire<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    id: i64,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    section_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    section_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deadline: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_overdue: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

impl Serialize for ActionItem {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut wire = ActionItemWire {
            kind: self.kind(),
            id: self.id(),
            title: self.title(),
            description: None,
            section_id: None,
            section_name: None,
            deadline: None,
            is_overdue: None,
            completed_at: self.completed_at(),
        };
        match self {
            ActionItem::MissingDocument(m) => {
                wire.section_id = Some(m.section_id);
                wire.section_name = Some(&m.section_name);
                wire.deadline = Some(None);
                wire.is_overdue = Some(false);
            }
            ActionItem::RequiredAction(r) => {
                wire.description = Some(&r.description);
                wire.deadline = Some(r.deadline);
                wire.is_overdue = Some(r.is_overdue);
            }
            ActionItem::CompletedDocument(_) | ActionItem::CompletedAction(_) => {}
        }
        wire.serialize(serializer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItems {
    pub needs_attention: Vec<ActionItem>,
    pub completed: Vec<ActionItem>,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// The four reads the aggregation needs. Each is independent of the others.
pub trait ActionSource {
    fn missing_documents(&self, user_id: i64) -> Result<Vec<MissingDocumentRow>>;
    fn required_actions(&self, user_id: i64) -> Result<Vec<TrackingEntry>>;
    fn documents_uploaded_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<Document>>;
    fn actions_completed_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<TrackingEntry>>;

    /// All four reads. Sources shared with writers should override this to
    /// read from a single snapshot.
    fn read_rows(&self, user_id: i64, since: DateTime<Utc>) -> Result<SourceRows> {
        Ok(SourceRows {
            missing_documents: self.missing_documents(user_id)?,
            required_actions: self.required_actions(user_id)?,
            recent_uploads: self.documents_uploaded_since(user_id, since)?,
            recent_completions: self.actions_completed_since(user_id, since)?,
        })
    }
}

impl ActionSource for Database {
    fn missing_documents(&self, user_id: i64) -> Result<Vec<MissingDocumentRow>> {
        self.list_missing_documents(user_id)
    }

    fn required_actions(&self, user_id: i64) -> Result<Vec<TrackingEntry>> {
        self.list_required_actions(user_id)
    }

    fn documents_uploaded_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<Document>> {
        self.list_uploaded_since(user_id, since)
    }

    fn actions_completed_since(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<TrackingEntry>> {
        self.list_completed_since(user_id, since)
    }

    /// One lock and one deferred transaction for all four queries.
    fn read_rows(&self, user_id: i64, since: DateTime<Utc>) -> Result<SourceRows> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let rows = SourceRows {
            missing_documents: document::query_missing_documents(&tx, user_id)?,
            required_actions: tracking::query_required_actions(&tx, user_id)?,
            recent_uploads: document::query_uploaded_since(&tx, user_id, since)?,
            recent_completions: tracking::query_completed_since(&tx, user_id, since)?,
        };
        tx.commit()?;
        Ok(rows)
    }
}

/// Rows read for one aggregation.
#[derive(Debug, Clone, Default)]
pub struct SourceRows {
    pub missing_documents: Vec<MissingDocumentRow>,
    pub required_actions: Vec<TrackingEntry>,
    pub recent_uploads: Vec<Document>,
    pub recent_completions: Vec<TrackingEntry>,
}

impl SourceRows {
    /// Perform all four reads as of `now`; any failure fails the whole read.
    pub fn read(source: &impl ActionSource, user_id: i64, now: DateTime<Utc>) -> Result<Self> {
        source.read_rows(user_id, recency_cutoff(now))
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Action items for `user_id` as of `clock.now()`.
pub fn for_user(
    source: &impl ActionSource,
    user_id: i64,
    clock: &dyn Clock,
) -> Result<ActionItems> {
    let now = clock.now();
    let rows = SourceRows::read(source, user_id, now)?;
    Ok(aggregate(rows, now))
}

/// Classify and order `rows` as of `now`.
///
/// The classification rules are re-applied here, so rows that a source
/// returned too generously (wrong status, outside the window) are dropped.
pub fn aggregate(rows: SourceRows, now: DateTime<Utc>) -> ActionItems {
    let cutoff = recency_cutoff(now);

    let missing = rows
        .missing_documents
        .into_iter()
        .filter(|m| m.document.status == DocumentStatus::Missing)
        .map(|m| {
            ActionItem::MissingDocument(MissingDocument {
                id: m.document.id,
                title: m.document.name,
                section_id: m.document.section_id,
                section_name: m.section_name,
            })
        });

    let required = rows
        .required_actions
        .into_iter()
        .filter(TrackingEntry::is_open_action)
        .map(|t| {
            ActionItem::RequiredAction(RequiredAction {
                id: t.id,
                is_overdue: t.action_deadline.is_some_and(|d| d < now),
                deadline: t.action_deadline,
                title: t.title,
                description: t.description,
            })
        });

    let mut needs_attention: Vec<ActionItem> = missing.chain(required).collect();
    // Stable: equal items keep their source order.
    needs_attention.sort_by(urgency);

    let uploads = rows.recent_uploads.into_iter().filter_map(|d| {
        let completed_at = d.uploaded_at.filter(|at| *at > cutoff)?;
        (d.status == DocumentStatus::Uploaded).then(|| {
            ActionItem::CompletedDocument(CompletedItem {
                id: d.id,
                title: d.name,
                completed_at,
            })
        })
    });

    let completions = rows.recent_completions.into_iter().filter_map(|t| {
        let completed_at = t.action_completed_at.filter(|at| *at > cutoff)?;
        Some(ActionItem::CompletedAction(CompletedItem {
            id: t.id,
            title: t.title,
            completed_at,
        }))
    });

    let mut completed: Vec<ActionItem> = uploads.chain(completions).collect();
    completed.sort_by(|a, b| b.completed_at().cmp(&a.completed_at()));

    tracing::debug!(
        needs_attention = needs_attention.len(),
        completed = completed.len(),
        "aggregated action items"
    );

    ActionItems {
        needs_attention,
        completed,
    }
}

/// Total order for `needs_attention`; see the module docs.
pub fn urgency(a: &ActionItem, b: &ActionItem) -> Ordering {
    b.is_overdue()
        .cmp(&a.is_overdue())
        .then_with(|| match (a.deadline(), b.deadline()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
