use crate::error::TrackerError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// DocumentStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Uploaded,
    Pending,
    Missing,
}

impl DocumentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Uploaded => "uploaded",
            DocumentStatus::Pending => "pending",
            DocumentStatus::Missing => "missing",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uploaded" => Ok(DocumentStatus::Uploaded),
            "pending" => Ok(DocumentStatus::Pending),
            "missing" => Ok(DocumentStatus::Missing),
            _ => Err(TrackerError::InvalidDocumentStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// DocumentCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Personal,
    Medical,
    Legal,
    Employment,
    Government,
}

impl DocumentCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentCategory::Personal => "personal",
            DocumentCategory::Medical => "medical",
            DocumentCategory::Legal => "legal",
            DocumentCategory::Employment => "employment",
            DocumentCategory::Government => "government",
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentCategory {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(DocumentCategory::Personal),
            "medical" => Ok(DocumentCategory::Medical),
            "legal" => Ok(DocumentCategory::Legal),
            "employment" => Ok(DocumentCategory::Employment),
            "government" => Ok(DocumentCategory::Government),
            _ => Err(TrackerError::InvalidDocumentCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SectionStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionStatus {
    Complete,
    InProgress,
    NeedsAttention,
}

impl SectionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionStatus::Complete => "complete",
            SectionStatus::InProgress => "in-progress",
            SectionStatus::NeedsAttention => "needs-attention",
        }
    }
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SectionStatus {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "complete" => Ok(SectionStatus::Complete),
            "in-progress" => Ok(SectionStatus::InProgress),
            "needs-attention" => Ok(SectionStatus::NeedsAttention),
            _ => Err(TrackerError::InvalidSectionStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// CommunicationType
// ---------------------------------------------------------------------------

/// How a tracking entry reached the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationType {
    Email,
    Letter,
    PhoneCall,
    OnlineMessage,
    Deadline,
    Appointment,
}

impl CommunicationType {
    pub fn as_str(self) -> &'static str {
        match self {
            CommunicationType::Email => "email",
            CommunicationType::Letter => "letter",
            CommunicationType::PhoneCall => "phone_call",
            CommunicationType::OnlineMessage => "online_message",
            CommunicationType::Deadline => "deadline",
            CommunicationType::Appointment => "appointment",
        }
    }
}

impl fmt::Display for CommunicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommunicationType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(CommunicationType::Email),
            "letter" => Ok(CommunicationType::Letter),
            "phone_call" => Ok(CommunicationType::PhoneCall),
            "online_message" => Ok(CommunicationType::OnlineMessage),
            "deadline" => Ok(CommunicationType::Deadline),
            "appointment" => Ok(CommunicationType::Appointment),
            _ => Err(TrackerError::InvalidCommunicationType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    SocialSecurity,
    SsaGov,
    Phone,
    Mail,
    Email,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::SocialSecurity => "social_security",
            Source::SsaGov => "ssa_gov",
            Source::Phone => "phone",
            Source::Mail => "mail",
            Source::Email => "email",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Source {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "social_security" => Ok(Source::SocialSecurity),
            "ssa_gov" => Ok(Source::SsaGov),
            "phone" => Ok(Source::Phone),
            "mail" => Ok(Source::Mail),
            "email" => Ok(Source::Email),
            _ => Err(TrackerError::InvalidSource(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(TrackerError::InvalidPriority(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
