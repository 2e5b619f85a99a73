use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use sea_orm::{prelude::Expr, sea_query::SimpleExpr, DeriveValueType};
use serde::{de, Deserialize, Serialize};

/// UTC instant stored as milliseconds since the epoch.
///
/// On the wire it travels as an RFC 3339 string, e.g. `2025-01-05T10:20:30.000Z`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, DeriveValueType)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_millis(v: i64) -> Timestamp {
        Timestamp(v)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    pub fn now() -> Timestamp {
        Timestamp(Utc::now().timestamp_millis())
    }

    /// Column default used by the schema, evaluated by SQLite.
    pub fn now_expr() -> SimpleExpr {
        Expr::cust("(strftime('%s','now')*1000)")
    }

    pub fn to_rfc3339(&self) -> String {
        DateTime::<Utc>::from(*self).to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        match Utc.timestamp_millis_opt(ts.0) {
            chrono::MappedLocalTime::Single(dt) => dt,
            _ => DateTime::<Utc>::from_timestamp_nanos(0),
        }
    }
}

impl TryFrom<&str> for Timestamp {
    type Error = chrono::format::ParseError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        DateTime::parse_from_rfc3339(value).map(|d| d.with_timezone(&Utc).into())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = String::deserialize(deserializer)?;
        Timestamp::try_from(v.as_str()).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_rfc3339() {
        let ts = Timestamp::from_millis(1_700_000_000_123);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2023-11-14T22:13:20.123Z\"");

        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn accepts_offsets() {
        let ts = Timestamp::try_from("2023-11-14T23:13:20.123+01:00").unwrap();
        assert_eq!(ts.as_millis(), 1_700_000_000_123);
    }
}
