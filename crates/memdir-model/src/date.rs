//! External date representations accepted from host forms and stored
//! member records.
//!
//! Birth dates arrive in more than one wire shape: an ISO `YYYY-MM-DD`
//! string, or a structured epoch pair (`{seconds, nanoseconds}`) as the
//! original document store persisted timestamps. Both normalize to a
//! single calendar date before any date arithmetic runs; unrecognized
//! shapes normalize to "absent", never an error.

use chrono::{DateTime, NaiveDate};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// An external date value in one of the supported wire shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue {
    /// A plain calendar date, `YYYY-MM-DD` on the wire.
    Calendar(NaiveDate),
    /// An epoch pair as persisted by the original document store.
    Epoch { seconds: i64, nanoseconds: u32 },
}

impl DateValue {
    /// Normalize to a calendar date. Epoch pairs decompose in UTC.
    ///
    /// Returns `None` for epoch values outside the representable range.
    pub fn to_calendar_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Calendar(date) => Some(*date),
            Self::Epoch { seconds, .. } => {
                DateTime::from_timestamp(*seconds, 0).map(|dt| dt.date_naive())
            }
        }
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self::Calendar(date)
    }
}

impl Serialize for DateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Calendar(date) => {
                serializer.serialize_str(&date.format(ISO_DATE_FORMAT).to_string())
            }
            Self::Epoch {
                seconds,
                nanoseconds,
            } => {
                let mut state = serializer.serialize_struct("DateValue", 2)?;
                state.serialize_field("seconds", seconds)?;
                state.serialize_field("nanoseconds", nanoseconds)?;
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DateValueVisitor;

        impl<'de> Visitor<'de> for DateValueVisitor {
            type Value = DateValue;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("an ISO date string or an epoch {seconds, nanoseconds} pair")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<DateValue, E> {
                NaiveDate::parse_from_str(v, ISO_DATE_FORMAT)
                    .map(DateValue::Calendar)
                    .map_err(|_| de::Error::custom(format!("unparseable date: {v}")))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<DateValue, A::Error> {
                let mut seconds: Option<i64> = None;
                let mut nanoseconds: Option<u32> = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "seconds" => seconds = Some(map.next_value()?),
                        "nanoseconds" => nanoseconds = Some(map.next_value()?),
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                let seconds = seconds.ok_or_else(|| de::Error::missing_field("seconds"))?;
                Ok(DateValue::Epoch {
                    seconds,
                    nanoseconds: nanoseconds.unwrap_or(0),
                })
            }
        }

        deserializer.deserialize_any(DateValueVisitor)
    }
}

/// Lenient deserializer for optional date fields.
///
/// Anything that is not a recognized date shape (bad string, wrong map,
/// a number, a list) becomes `None` instead of failing the whole record.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateValue>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = Option<DateValue>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("any value; non-date shapes map to None")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(NaiveDate::parse_from_str(v, ISO_DATE_FORMAT)
                .ok()
                .map(DateValue::Calendar))
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut seconds: Option<i64> = None;
            let mut nanoseconds: Option<u32> = None;
            while let Some(key) = map.next_key::<String>()? {
                match key.as_str() {
                    "seconds" => seconds = map.next_value::<LenientInt>()?.0,
                    "nanoseconds" => {
                        nanoseconds = map
                            .next_value::<LenientInt>()?
                            .0
                            .and_then(|n| u32::try_from(n).ok());
                    }
                    _ => {
                        map.next_value::<de::IgnoredAny>()?;
                    }
                }
            }
            Ok(seconds.map(|seconds| DateValue::Epoch {
                seconds,
                nanoseconds: nanoseconds.unwrap_or(0),
            }))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, deserializer: D2) -> Result<Self::Value, D2::Error> {
            deserializer.deserialize_any(LenientVisitor)
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

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<de::IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    deserializer.deserialize_any(LenientVisitor)
}

/// An integer field that consumes whatever shape it finds, yielding
/// `None` instead of a parse error for non-integers.
struct LenientInt(Option<i64>);

impl<'de> Deserialize<'de> for LenientInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IntVisitor;

        impl<'de> Visitor<'de> for IntVisitor {
            type Value = LenientInt;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("any value; non-integers map to None")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<LenientInt, E> {
                Ok(LenientInt(Some(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<LenientInt, E> {
                Ok(LenientInt(i64::try_from(v).ok()))
            }

            fn visit_f64<E: de::Error>(self, _: f64) -> Result<LenientInt, E> {
                Ok(LenientInt(None))
            }

            fn visit_str<E: de::Error>(self, _: &str) -> Result<LenientInt, E> {
                Ok(LenientInt(None))
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<LenientInt, E> {
                Ok(LenientInt(None))
            }

            fn visit_none<E: de::Error>(self) -> Result<LenientInt, E> {
                Ok(LenientInt(None))
            }

            fn visit_unit<E: de::Error>(self) -> Result<LenientInt, E> {
                Ok(LenientInt(None))
            }

            fn visit_some<D2: Deserializer<'de>>(
                self,
                deserializer: D2,
            ) -> Result<LenientInt, D2::Error> {
                deserializer.deserialize_any(IntVisitor)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<LenientInt, A::Error> {
                while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
                Ok(LenientInt(None))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<LenientInt, A::Error> {
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}
                Ok(LenientInt(None))
            }
        }

        deserializer.deserialize_any(IntVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::DateValue;
    use chrono::NaiveDate;

    #[test]
    fn calendar_value_round_trips_as_iso_string() {
        let date = NaiveDate::from_ymd_opt(1991, 1, 15).unwrap();
        let json = serde_json::to_string(&DateValue::Calendar(date)).unwrap();
        assert_eq!(json, "\"1991-01-15\"");
        let round: DateValue = serde_json::from_str(&json).unwrap();
        assert_eq!(round.to_calendar_date(), Some(date));
    }

    #[test]
    fn epoch_value_decomposes_in_utc() {
        let value: DateValue =
            serde_json::from_str(r#"{"seconds":662256000,"nanoseconds":0}"#).unwrap();
        assert_eq!(
            value.to_calendar_date(),
            NaiveDate::from_ymd_opt(1990, 12, 27)
        );
    }

    #[test]
    fn lenient_field_swallows_garbage() {
        #[derive(serde::Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "super::lenient_date")]
            birthdate: Option<DateValue>,
        }

        for raw in [
            r#"{"birthdate":"not-a-date"}"#,
            r#"{"birthdate":42}"#,
            r#"{"birthdate":[1,2,3]}"#,
            r#"{"birthdate":{"foo":"bar"}}"#,
            r#"{"birthdate":{"seconds":"abc","nanoseconds":0}}"#,
            r#"{"birthdate":null}"#,
            r#"{}"#,
        ] {
            let holder: Holder = serde_json::from_str(raw).expect(raw);
            assert!(holder.birthdate.is_none(), "expected None for {raw}");
        }
    }
}
