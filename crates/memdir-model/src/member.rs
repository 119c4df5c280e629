//! Member records as stored by the directory.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::address::AddressValue;
use crate::date::{DateValue, lenient_date};

/// Whether a member is living. The wire strings are the Thai status
/// labels the original records were stored with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliveStatus {
    #[serde(rename = "ยังมีชีวิตอยู่")]
    Alive,
    #[serde(rename = "เสียชีวิตแล้ว")]
    Deceased,
}

impl AliveStatus {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Alive => "ยังมีชีวิตอยู่",
            Self::Deceased => "เสียชีวิตแล้ว",
        }
    }

    /// Parse a wire string; unknown labels map to `None`.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim() {
            "ยังมีชีวิตอยู่" => Some(Self::Alive),
            "เสียชีวิตแล้ว" => Some(Self::Deceased),
            _ => None,
        }
    }
}

/// A member's stored address: a free-text first line plus the
/// structured value produced by the address selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAddress {
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(rename = "addressObject", default)]
    pub address_object: Option<AddressValue>,
}

/// One directory member.
///
/// Every field is optional: imported records degrade per-field rather
/// than rejecting the whole row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub birthdate: Option<DateValue>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub alive: Option<AliveStatus>,
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub address: Option<MemberAddress>,
}

impl Member {
    pub fn is_deceased(&self) -> bool {
        self.alive == Some(AliveStatus::Deceased)
    }

    /// `rank firstname lastname`, skipping absent parts.
    pub fn display_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(rank) = self.rank.as_deref() {
            parts.push(rank);
        }
        if let Some(firstname) = self.firstname.as_deref() {
            parts.push(firstname);
        }
        if let Some(lastname) = self.lastname.as_deref() {
            parts.push(lastname);
        }
        parts.join(" ")
    }
}

/// Lenient deserializer for the status field: unknown labels and
/// non-string values become `None`.
fn lenient_status<'de, D>(deserializer: D) -> Result<Option<AliveStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StatusVisitor;

    impl<'de> Visitor<'de> for StatusVisitor {
        type Value = Option<AliveStatus>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a member status string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(AliveStatus::from_wire(v))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(
            self,
            deserializer: D2,
        ) -> Result<Self::Value, D2::Error> {
            deserializer.deserialize_any(StatusVisitor)
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StatusVisitor)
}

#[cfg(test)]
mod tests {
    use super::{AliveStatus, Member};

    #[test]
    fn member_parses_original_wire_shape() {
        let member: Member = serde_json::from_str(
            r#"{
                "id": "abc123",
                "rank": "พ.ต.ท.",
                "firstname": "สมชาย",
                "lastname": "ใจดี",
                "birthdate": {"seconds": 0, "nanoseconds": 0},
                "alive": "ยังมีชีวิตอยู่",
                "photoURL": "https://example.com/p.jpg",
                "address": {
                    "line1": "99/1 ถนนพระอาทิตย์",
                    "addressObject": {
                        "provinceId": 1,
                        "districtId": 1001,
                        "subdistrictId": 100101,
                        "zipCode": "10200"
                    }
                }
            }"#,
        )
        .expect("deserialize member");
        assert_eq!(member.alive, Some(AliveStatus::Alive));
        assert_eq!(member.display_name(), "พ.ต.ท. สมชาย ใจดี");
        let address = member.address.unwrap().address_object.unwrap();
        assert!(address.is_complete());
    }

    #[test]
    fn unknown_status_degrades_to_none() {
        let member: Member = serde_json::from_str(r#"{"alive":"unknown"}"#).unwrap();
        assert_eq!(member.alive, None);
        assert!(!member.is_deceased());
    }
}
