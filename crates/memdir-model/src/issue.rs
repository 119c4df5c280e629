use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// A validation issue found on a single member record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberIssue {
    /// Field the issue concerns (e.g., "firstname", "birthdate").
    pub field: String,
    /// Human-readable message describing the issue.
    pub message: String,
    /// Severity level.
    pub severity: IssueSeverity,
}

/// Validation report for a single member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberReport {
    /// Display name of the member the report covers.
    pub member: String,
    pub issues: Vec<MemberIssue>,
}

impl MemberReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}
