//! Member record validation.
//!
//! First and last name are always required. Birth date and a complete
//! address are required only while the member is alive; records for
//! deceased members may omit both.

use memdir_model::{IssueSeverity, Member, MemberIssue, MemberReport};

pub fn validate_member(member: &Member) -> MemberReport {
    let mut issues = Vec::new();

    if is_blank(member.firstname.as_deref()) {
        issues.push(required("firstname"));
    }
    if is_blank(member.lastname.as_deref()) {
        issues.push(required("lastname"));
    }

    if !member.is_deceased() {
        match member.birthdate {
            None => issues.push(required("birthdate")),
            Some(value) => {
                if value.to_calendar_date().is_none() {
                    issues.push(MemberIssue {
                        field: "birthdate".to_string(),
                        message: "does not resolve to a calendar date".to_string(),
                        severity: IssueSeverity::Error,
                    });
                }
            }
        }

        let complete = member
            .address
            .as_ref()
            .and_then(|a| a.address_object.as_ref())
            .is_some_and(|v| v.is_complete());
        if !complete {
            issues.push(MemberIssue {
                field: "address".to_string(),
                message: "requires province, district, and subdistrict".to_string(),
                severity: IssueSeverity::Error,
            });
        }
    }

    if member.alive.is_none() {
        issues.push(MemberIssue {
            field: "alive".to_string(),
            message: "unknown status".to_string(),
            severity: IssueSeverity::Warning,
        });
    }

    MemberReport {
        member: member.display_name(),
        issues,
    }
}

fn required(field: &str) -> MemberIssue {
    MemberIssue {
        field: field.to_string(),
        message: "required".to_string(),
        severity: IssueSeverity::Error,
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(str::trim).unwrap_or("").is_empty()
}
