#![deny(unsafe_code)]

use std::collections::BTreeMap;

use memdir_model::AddressTables;

use crate::registry::GazetteerRegistry;

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub manifest_verified: bool,
    pub counts: DoctorCounts,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorCounts {
    pub provinces: usize,
    pub districts: usize,
    pub subdistricts: usize,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Finding {
    pub kind: String,
    pub table: String,
    pub id: i64,
    pub message: String,
}

impl DoctorReport {
    /// Run the integrity checks over a loaded registry: duplicate ids,
    /// orphaned parent references, and postal-code anomalies.
    pub fn from_registry(registry: &GazetteerRegistry) -> Self {
        let mut findings = Vec::new();

        check_duplicates(
            registry.provinces().iter().map(|p| p.id),
            "provinces",
            &mut findings,
        );
        check_duplicates(
            registry.districts().iter().map(|d| d.id),
            "districts",
            &mut findings,
        );
        check_duplicates(
            registry.subdistricts().iter().map(|s| s.id),
            "subdistricts",
            &mut findings,
        );

        for district in registry.districts() {
            if registry.province(district.province_id).is_none() {
                findings.push(Finding {
                    kind: "orphaned_parent".to_string(),
                    table: "districts".to_string(),
                    id: district.id,
                    message: format!("province_id {} has no province row", district.province_id),
                });
            }
        }
        for subdistrict in registry.subdistricts() {
            if registry.district(subdistrict.district_id).is_none() {
                findings.push(Finding {
                    kind: "orphaned_parent".to_string(),
                    table: "subdistricts".to_string(),
                    id: subdistrict.id,
                    message: format!(
                        "district_id {} has no district row",
                        subdistrict.district_id
                    ),
                });
            }
            if !is_plausible_zip(&subdistrict.zip_code) {
                findings.push(Finding {
                    kind: "zip_anomaly".to_string(),
                    table: "subdistricts".to_string(),
                    id: subdistrict.id,
                    message: format!("zip_code {:?} is not a 5-digit code", subdistrict.zip_code),
                });
            }
        }

        findings.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| a.table.cmp(&b.table))
                .then_with(|| a.id.cmp(&b.id))
        });

        Self {
            schema: "memdir.gazetteer-doctor".to_string(),
            schema_version: 1,
            manifest_verified: registry.manifest().is_some(),
            counts: DoctorCounts {
                provinces: registry.provinces().len(),
                districts: registry.districts().len(),
                subdistricts: registry.subdistricts().len(),
            },
            findings,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.findings.is_empty()
    }
}

fn check_duplicates(ids: impl Iterator<Item = i64>, table: &str, findings: &mut Vec<Finding>) {
    let mut seen: BTreeMap<i64, usize> = BTreeMap::new();
    for id in ids {
        *seen.entry(id).or_insert(0) += 1;
    }
    for (id, count) in seen {
        if count > 1 {
            findings.push(Finding {
                kind: "duplicate_id".to_string(),
                table: table.to_string(),
                id,
                message: format!("id appears {count} times"),
            });
        }
    }
}

fn is_plausible_zip(zip: &str) -> bool {
    zip.len() == 5 && zip.chars().all(|c| c.is_ascii_digit())
}
