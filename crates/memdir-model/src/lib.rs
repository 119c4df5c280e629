pub mod address;
pub mod date;
pub mod issue;
pub mod member;

pub use address::{AddressTables, AddressValue, District, Province, Subdistrict};
pub use date::DateValue;
pub use issue::{IssueSeverity, MemberIssue, MemberReport};
pub use member::{AliveStatus, Member, MemberAddress};

#[cfg(test)]
mod tests {
    use super::{IssueSeverity, MemberIssue, MemberReport};

    #[test]
    fn member_report_counts() {
        let report = MemberReport {
            member: "สมชาย ใจดี".to_string(),
            issues: vec![
                MemberIssue {
                    field: "firstname".to_string(),
                    message: "required".to_string(),
                    severity: IssueSeverity::Error,
                },
                MemberIssue {
                    field: "phone".to_string(),
                    message: "not a phone number".to_string(),
                    severity: IssueSeverity::Warning,
                },
            ],
        };
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
    }
}
