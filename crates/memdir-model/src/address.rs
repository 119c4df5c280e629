//! Thai administrative gazetteer rows and the address value exchanged
//! with host forms.
//!
//! The row types mirror the upstream gazetteer JSON assets, so the serde
//! shapes accept the original field spellings (`amphure_id` for a
//! subdistrict's district reference, numeric or string `zip_code`).

use serde::{Deserialize, Serialize};

/// Top-level administrative region (จังหวัด).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub id: i64,
    pub name_th: String,
    #[serde(default)]
    pub name_en: String,
}

/// Second-level region (อำเภอ/เขต). `province_id` references [`Province::id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: i64,
    pub name_th: String,
    #[serde(default)]
    pub name_en: String,
    pub province_id: i64,
}

/// Leaf region (ตำบล/แขวง). `district_id` references [`District::id`] and
/// carries the postal code for the whole subdistrict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdistrict {
    pub id: i64,
    pub name_th: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(alias = "amphure_id")]
    pub district_id: i64,
    #[serde(deserialize_with = "zip_string")]
    pub zip_code: String,
}

/// The address shape exchanged with a host form.
///
/// Serialized camelCase (`provinceId`, ...) to round-trip the wire shape
/// the original member records were stored with. A fully selected address
/// has all three ids plus the derived `zipCode`; hosts treat anything
/// less as "no valid value yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressValue {
    pub province_id: Option<i64>,
    pub district_id: Option<i64>,
    pub subdistrict_id: Option<i64>,
    pub zip_code: Option<String>,
}

impl AddressValue {
    /// True when all three hierarchy levels carry an id.
    pub fn is_complete(&self) -> bool {
        self.province_id.is_some() && self.district_id.is_some() && self.subdistrict_id.is_some()
    }
}

/// Read access to the three loaded gazetteer tables.
///
/// Implemented by the gazetteer registry; consumers that only need to
/// resolve names (roster rendering, search) depend on this trait rather
/// than the loader.
pub trait AddressTables {
    fn provinces(&self) -> &[Province];
    fn districts(&self) -> &[District];
    fn subdistricts(&self) -> &[Subdistrict];

    fn province_name(&self, id: i64) -> Option<&str> {
        self.provinces()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name_th.as_str())
    }

    fn district_name(&self, id: i64) -> Option<&str> {
        self.districts()
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.name_th.as_str())
    }

    fn subdistrict_name(&self, id: i64) -> Option<&str> {
        self.subdistricts()
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name_th.as_str())
    }
}

/// Accept `zip_code` as either a JSON string or a bare number.
fn zip_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct ZipVisitor;

    impl serde::de::Visitor<'_> for ZipVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a postal code as a string or number")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(ZipVisitor)
}

#[cfg(test)]
mod tests {
    use super::{AddressValue, Subdistrict};

    #[test]
    fn subdistrict_accepts_upstream_field_spellings() {
        let row: Subdistrict = serde_json::from_str(
            r#"{"id":100101,"name_th":"พระบรมมหาราชวัง","name_en":"Phra Borom Maha Ratchawang","amphure_id":1001,"zip_code":10200}"#,
        )
        .expect("deserialize subdistrict");
        assert_eq!(row.district_id, 1001);
        assert_eq!(row.zip_code, "10200");
    }

    #[test]
    fn address_value_round_trips_camel_case() {
        let value = AddressValue {
            province_id: Some(1),
            district_id: Some(1001),
            subdistrict_id: Some(100101),
            zip_code: Some("10200".to_string()),
        };
        let json = serde_json::to_string(&value).expect("serialize");
        assert!(json.contains("\"provinceId\":1"));
        assert!(json.contains("\"zipCode\":\"10200\""));
        let round: AddressValue = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(round, value);
    }
}
