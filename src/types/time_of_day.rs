//! Wall-clock time of day, carried on the wire as `HH:MM:SS`.
//!
//! Appointment and availability slots only care about "what time", so this
//! type keeps hour, minute and second and nothing else. The date, zone and
//! sub-second parts of any timestamp it is built from are dropped.

use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::sqlite::{Sqlite, SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef};
use sqlx::{Decode, Encode, Type};
use tracing::debug;

use crate::error::SchedError;

const WIRE_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Parse a strict, zero-padded 24-hour `HH:MM:SS` string.
    pub fn parse(text: &str) -> Result<Self, SchedError> {
        let bytes = text.as_bytes();
        if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
            debug!(input = text, "rejected time of day: bad shape");
            return Err(SchedError::format(text));
        }

        let field = |at: usize| -> Option<u32> {
            let (hi, lo) = (bytes[at], bytes[at + 1]);
            (hi.is_ascii_digit() && lo.is_ascii_digit())
                .then(|| u32::from(hi - b'0') * 10 + u32::from(lo - b'0'))
        };

        match (field(0), field(3), field(6)) {
            (Some(h), Some(m), Some(s)) => NaiveTime::from_hms_opt(h, m, s)
                .map(Self)
                .ok_or_else(|| {
                    debug!(input = text, "rejected time of day: component out of range");
                    SchedError::format(text)
                }),
            _ => {
                debug!(input = text, "rejected time of day: non-numeric component");
                Err(SchedError::format(text))
            }
        }
    }

    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Keep only hour, minute and second of any chrono timestamp.
    pub fn from_timestamp<T: Timelike>(t: &T) -> Self {
        // Timelike components are always in range, so this never falls back.
        Self(NaiveTime::from_hms_opt(t.hour(), t.minute(), t.second()).unwrap_or(NaiveTime::MIN))
    }

    /// Re-attach a date. No date was retained, so the reference date
    /// (1970-01-01) is used.
    pub fn to_timestamp(&self) -> NaiveDateTime {
        DateTime::<Utc>::UNIX_EPOCH.date_naive().and_time(self.0)
    }

    /// True for midnight, which is what the zero timestamp maps to.
    pub fn is_zero(&self) -> bool {
        self.0 == NaiveTime::MIN
    }

    pub fn before(&self, other: &TimeOfDay) -> bool {
        self < other
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self(NaiveTime::MIN)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        Self::from_timestamp(&t)
    }
}

impl From<NaiveDateTime> for TimeOfDay {
    fn from(t: NaiveDateTime) -> Self {
        Self::from_timestamp(&t)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TimeOfDay {
    fn from(t: DateTime<Tz>) -> Self {
        Self::from_timestamp(&t)
    }
}

impl From<TimeOfDay> for NaiveTime {
    fn from(t: TimeOfDay) -> Self {
        t.0
    }
}

impl FromStr for TimeOfDay {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TimeOfDay::parse(&s).map_err(serde::de::Error::custom)
    }
}

// Stored as TEXT in the same `HH:MM:SS` form used on the wire.
impl Type<Sqlite> for TimeOfDay {
    fn type_info() -> SqliteTypeInfo {
        <str as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <str as Type<Sqlite>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Sqlite> for TimeOfDay {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<SqliteArgumentValue<'q>>,
    ) -> Result<IsNull, BoxDynError> {
        <String as Encode<'q, Sqlite>>::encode(self.to_string(), buf)
    }
}

impl<'r> Decode<'r, Sqlite> for TimeOfDay {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let text = <&str as Decode<'r, Sqlite>>::decode(value)?;
        Ok(TimeOfDay::parse(text)?)
    }
}
