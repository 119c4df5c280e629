//! Roster import from JSON and CSV files.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::warn;

use memdir_model::{AddressValue, AliveStatus, DateValue, Member, MemberAddress};

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse roster CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Load a roster from a JSON array of member records.
///
/// Unknown and malformed field values inside a record degrade to
/// `None`; only a file that is not a JSON array of objects fails.
pub fn load_roster_json(path: &Path) -> Result<Vec<Member>, RosterError> {
    let raw = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| RosterError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a roster from a header-keyed CSV file.
///
/// Each row becomes one member. Fields that fail to parse are dropped
/// from that member with a warning rather than failing the import.
pub fn load_roster_csv(path: &Path) -> Result<Vec<Member>, RosterError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| RosterError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let headers = reader
        .headers()
        .map_err(|source| RosterError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let mut members = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| RosterError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row = Row {
            headers: &headers,
            record: &record,
            line: index + 2,
        };
        members.push(member_from_row(&row));
    }
    Ok(members)
}

struct Row<'a> {
    headers: &'a csv::StringRecord,
    record: &'a csv::StringRecord,
    line: usize,
}

impl Row<'_> {
    fn text(&self, field: &str) -> Option<String> {
        let position = self.headers.iter().position(|h| h == field)?;
        let value = self.record.get(position)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    fn id(&self, field: &str) -> Option<i64> {
        let value = self.text(field)?;
        match value.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(line = self.line, field, value, "dropping unparseable id");
                None
            }
        }
    }
}

fn member_from_row(row: &Row<'_>) -> Member {
    let birthdate = row.text("birthdate").and_then(|value| {
        match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
            Ok(date) => Some(DateValue::Calendar(date)),
            Err(_) => {
                warn!(line = row.line, value, "dropping unparseable birthdate");
                None
            }
        }
    });

    let alive = row.text("alive").and_then(|value| {
        let status = AliveStatus::from_wire(&value);
        if status.is_none() {
            warn!(line = row.line, value, "dropping unknown status label");
        }
        status
    });

    let address_object = {
        let value = AddressValue {
            province_id: row.id("provinceId"),
            district_id: row.id("districtId"),
            subdistrict_id: row.id("subdistrictId"),
            zip_code: row.text("zipCode"),
        };
        if value == AddressValue::default() {
            None
        } else {
            Some(value)
        }
    };

    let line1 = row.text("line1");
    let address = if line1.is_none() && address_object.is_none() {
        None
    } else {
        Some(MemberAddress {
            line1,
            address_object,
        })
    };

    Member {
        id: row.text("id"),
        rank: row.text("rank"),
        firstname: row.text("firstname"),
        lastname: row.text("lastname"),
        phone: row.text("phone"),
        birthdate,
        alive,
        photo_url: row.text("photoURL"),
        address,
    }
}
