use crate::error::{Result, TrackerError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const SSDI_DIR: &str = ".ssdi";
pub const CONFIG_FILE: &str = ".ssdi/config.yaml";
pub const DEFAULT_DB_FILE: &str = ".ssdi/tracker.db";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn ssdi_dir(root: &Path) -> PathBuf {
    root.join(SSDI_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve a configured database path against the project root.
/// Absolute paths are returned unchanged.
pub fn database_path(root: &Path, configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        root.join(configured)
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

pub fn validate_email(email: &str) -> Result<()> {
    if email.len() > 256 || !email_re().is_match(email) {
        return Err(TrackerError::Validation(format!(
            "invalid email address '{email}'"
        )));
    }
    Ok(())
}

/// Reject blank values and values longer than the 256-character column limit.
pub fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrackerError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > 256 {
        return Err(TrackerError::Validation(format!(
            "{field} must be at most 256 characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_emails() {
        for email in ["claims@ssa.gov", "a.b+c@example.org"] {
            validate_email(email).unwrap_or_else(|_| panic!("expected valid: {email}"));
        }
    }

    #[test]
    fn invalid_emails() {
        for email in ["", "no-at-sign", "two@@ssa.gov", "spaces in@ssa.gov", "x@nodot"] {
            assert!(validate_email(email).is_err(), "expected invalid: {email}");
        }
    }

    #[test]
    fn required_rejects_blank() {
        assert!(validate_required("title", "   ").is_err());
        assert!(validate_required("title", "Denial Letter").is_ok());
        assert!(validate_required("title", &"x".repeat(257)).is_err());
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/case");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/case/.ssdi/config.yaml")
        );
        assert_eq!(
            database_path(root, Path::new(DEFAULT_DB_FILE)),
            PathBuf::from("/tmp/case/.ssdi/tracker.db")
        );
        assert_eq!(
            database_path(root, Path::new("/var/lib/ssdi.db")),
            PathBuf::from("/var/lib/ssdi.db")
        );
    }
}
