//! Demo claimant used by `ssdi init --seed`.

use chrono::{DateTime, TimeZone, Utc};

use crate::db::Database;
use crate::document::NewDocument;
use crate::error::Result;
use crate::section::NewSection;
use crate::tracking::NewTrackingEntry;
use crate::types::{
    CommunicationType, DocumentCategory, DocumentStatus, Priority, SectionStatus, Source,
};
use crate::user::{NewUser, User};

pub const SAMPLE_USERNAME: &str = "john.smith";

struct SampleDocument {
    name: &'static str,
    description: &'static str,
    file: Option<(&'static str, i64)>,
    contact_info: Option<&'static str>,
    notes: &'static str,
    category: DocumentCategory,
}

struct SampleSection {
    name: &'static str,
    description: &'static str,
    status: SectionStatus,
    documents: &'static [SampleDocument],
}

const SECTIONS: &[SampleSection] = &[
    SampleSection {
        name: "Initial Application Documents",
        description: "Basic information to start your application",
        status: SectionStatus::Complete,
        documents: &[
            SampleDocument {
                name: "Birth Certificate",
                description: "Proves your age and citizenship status",
                file: Some(("birth_certificate.pdf", 2_048_000)),
                contact_info: None,
                notes: "Official copy from vital records office",
                category: DocumentCategory::Government,
            },
            SampleDocument {
                name: "W-2 Forms (Last 2 Years)",
                description: "Shows your recent work history and earnings",
                file: Some(("w2_forms_2022_2023.pdf", 1_536_000)),
                contact_info: None,
                notes: "Forms from ABC Manufacturing",
                category: DocumentCategory::Employment,
            },
            SampleDocument {
                name: "Tax Returns (Last 2 Years)",
                description: "Additional proof of income and work history",
                file: Some(("tax_returns_2022_2023.pdf", 3_072_000)),
                contact_info: None,
                notes: "Filed jointly with spouse",
                category: DocumentCategory::Personal,
            },
        ],
    },
    SampleSection {
        name: "Medical Evidence",
        description: "Documents that prove your disability",
        status: SectionStatus::InProgress,
        documents: &[
            SampleDocument {
                name: "Primary Care Physician Records",
                description: "Records from Dr. Johnson showing ongoing treatment",
                file: Some(("dr_johnson_records.pdf", 4_096_000)),
                contact_info: Some("Dr. Johnson's office - (555) 123-4567"),
                notes: "Records from 2022-2024",
                category: DocumentCategory::Medical,
            },
            SampleDocument {
                name: "Specialist Reports",
                description: "Reports from specialists who treated your condition",
                file: None,
                contact_info: Some("Dr. Martinez's office - (555) 123-4567"),
                notes: "Need orthopedic specialist reports",
                category: DocumentCategory::Medical,
            },
        ],
    },
    SampleSection {
        name: "Work History Documentation",
        description: "Proof of your past employment and job duties",
        status: SectionStatus::Complete,
        documents: &[
            SampleDocument {
                name: "Employment Records (ABC Manufacturing)",
                description: "Job description and employment dates: 2018-2023",
                file: Some(("abc_employment_records.pdf", 1_024_000)),
                contact_info: None,
                notes: "HR department provided complete records",
                category: DocumentCategory::Employment,
            },
            SampleDocument {
                name: "Job Description Letters",
                description: "Detailed description of daily tasks and physical requirements",
                file: Some(("job_descriptions.pdf", 512_000)),
                contact_info: None,
                notes: "Includes physical demands analysis",
                category: DocumentCategory::Employment,
            },
        ],
    },
    SampleSection {
        name: "Appeals Process Documents",
        description: "Documents needed if your application is denied",
        status: SectionStatus::NeedsAttention,
        documents: &[SampleDocument {
            name: "Denial Letter",
            description: "Official denial letter explaining why your application was rejected",
            file: None,
            contact_info: None,
            notes: "Required to start appeal process - deadline May 15, 2024",
            category: DocumentCategory::Legal,
        }],
    },
];

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

fn tracking_entries() -> Vec<NewTrackingEntry> {
    vec![
        NewTrackingEntry {
            kind: CommunicationType::Email,
            title: "Early Retirement Application Received".into(),
            description: "Confirmation that your early retirement application has been received and is being processed".into(),
            received_at: at(2024, 1, 15, 10, 30, 0),
            source: Source::SsaGov,
            priority: Priority::Medium,
            is_action_required: false,
            action_deadline: None,
            notes: Some("Application reference: ER-2024-001234".into()),
            attachment_file_name: None,
            attachment_file_size: None,
        },
        NewTrackingEntry {
            kind: CommunicationType::Letter,
            title: "Request for Additional Documentation".into(),
            description: "Social Security Administration requesting additional employment verification documents".into(),
            received_at: at(2024, 2, 1, 14, 0, 0),
            source: Source::Mail,
            priority: Priority::High,
            is_action_required: true,
            action_deadline: Some(at(2024, 3, 1, 23, 59, 59)),
            notes: Some(
                "Need to provide W-2 forms from 2019-2023 and employment verification letter".into(),
            ),
            attachment_file_name: None,
            attachment_file_size: None,
        },
        NewTrackingEntry {
            kind: CommunicationType::PhoneCall,
            title: "Status Update Call".into(),
            description: "Called SSA to check on application status - told processing is taking 3-4 months".into(),
            received_at: at(2024, 2, 15, 11, 15, 0),
            source: Source::Phone,
            priority: Priority::Low,
            is_action_required: false,
            action_deadline: None,
            notes: Some(
                "Spoke with representative Sarah Johnson. Case number: ER-2024-001234. Expected decision by April 2024.".into(),
            ),
            attachment_file_name: None,
            attachment_file_size: None,
        },
        NewTrackingEntry {
            kind: CommunicationType::Deadline,
            title: "Medical Exam Appointment".into(),
            description: "Scheduled medical examination required for early retirement application".into(),
            received_at: at(2024, 2, 20, 9, 0, 0),
            source: Source::SocialSecurity,
            priority: Priority::High,
            is_action_required: true,
            action_deadline: Some(at(2024, 3, 15, 14, 0, 0)),
            notes: Some(
                "Appointment with Dr. Wilson at Downtown Medical Center. Bring ID and insurance cards.".into(),
            ),
            attachment_file_name: None,
            attachment_file_size: None,
        },
    ]
}

/// Create the demo claimant and their case file.
///
/// Returns `None` without touching the store when user 1 already exists.
pub fn seed_sample_data(db: &Database, now: DateTime<Utc>) -> Result<Option<User>> {
    if db.find_user(1)?.is_some() {
        tracing::info!("sample data already present, skipping");
        return Ok(None);
    }

    let user = db.create_user(
        &NewUser {
            username: SAMPLE_USERNAME.into(),
            name: Some("John Smith".into()),
            application_id: Some("SS-2024-001234".into()),
            email: None,
        },
        now,
    )?;

    for (i, sample) in SECTIONS.iter().enumerate() {
        let section = db.create_section(
            user.id,
            &NewSection {
                name: sample.name.into(),
                description: Some(sample.description.into()),
                status: sample.status,
                order: i as i64 + 1,
            },
        )?;
        for doc in sample.documents {
            let status = if doc.file.is_some() {
                DocumentStatus::Uploaded
            } else {
                DocumentStatus::Missing
            };
            db.create_document(
                section.id,
                user.id,
                &NewDocument {
                    name: doc.name.into(),
                    description: Some(doc.description.into()),
                    file_name: doc.file.map(|(name, _)| name.into()),
                    file_size: doc.file.map(|(_, size)| size),
                    status: Some(status),
                    contact_info: doc.contact_info.map(Into::into),
                    notes: Some(doc.notes.into()),
                    category: doc.category,
                },
                now,
            )?;
        }
    }

    for entry in tracking_entries() {
        db.create_tracking(user.id, &entry, now)?;
    }

    tracing::info!(user_id = user.id, username = %user.username, "seeded sample data");
    Ok(Some(user))
}
