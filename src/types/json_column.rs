//! Free-form JSON object stored in a single database column.
//!
//! Audit diffs and log payloads have no fixed schema, so they are kept as a
//! `serde_json` object tree and written to the column as raw JSON bytes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::sqlite::{Sqlite, SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef};
use sqlx::{Decode, Encode, Type, TypeInfo, ValueRef};
use tracing::debug;

use crate::error::{DecodeFailure, SchedError};

/// A scalar value as handed back by a database driver for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StorageValue<'a> {
    Bytes(&'a [u8]),
    Text(&'a str),
    Integer(i64),
    Real(f64),
    Null,
}

impl StorageValue<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            StorageValue::Bytes(_) => "bytes",
            StorageValue::Text(_) => "text",
            StorageValue::Integer(_) => "integer",
            StorageValue::Real(_) => "real",
            StorageValue::Null => "null",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonColumn(Map<String, Value>);

impl JsonColumn {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize to the bytes written into the column.
    pub fn to_storage(&self) -> Result<Vec<u8>, SchedError> {
        serde_json::to_vec(&self.0).map_err(SchedError::Encoding)
    }

    /// Rebuild the mapping from a raw column value. Only a byte sequence
    /// holding a JSON object is accepted.
    pub fn from_storage(raw: StorageValue<'_>) -> Result<Self, SchedError> {
        let StorageValue::Bytes(bytes) = raw else {
            debug!(found = raw.kind(), "rejected JSON column: not a byte sequence");
            return Err(DecodeFailure::UnexpectedRepresentation { found: raw.kind() }.into());
        };

        serde_json::from_slice::<Map<String, Value>>(bytes)
            .map(Self)
            .map_err(|e| {
                debug!(error = %e, len = bytes.len(), "rejected JSON column: invalid JSON");
                DecodeFailure::InvalidJson(e).into()
            })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for JsonColumn {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for JsonColumn {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl TryFrom<Value> for JsonColumn {
    type Error = Value;

    /// Only a JSON object converts; anything else is handed back unchanged.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

// Written as a BLOB. Every storage class is let through to `decode` so that a
// wrong one surfaces as a decoding error instead of a driver type mismatch.
impl Type<Sqlite> for JsonColumn {
    fn type_info() -> SqliteTypeInfo {
        <Vec<u8> as Type<Sqlite>>::type_info()
    }

    fn compatible(_ty: &SqliteTypeInfo) -> bool {
        true
    }
}

impl<'q> Encode<'q, Sqlite> for JsonColumn {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<SqliteArgumentValue<'q>>,
    ) -> Result<IsNull, BoxDynError> {
        <Vec<u8> as Encode<'q, Sqlite>>::encode(self.to_storage()?, buf)
    }
}

impl<'r> Decode<'r, Sqlite> for JsonColumn {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            return Ok(JsonColumn::from_storage(StorageValue::Null)?);
        }

        let class = value.type_info().name().to_owned();
        let raw = match class.as_str() {
            "BLOB" => StorageValue::Bytes(<&[u8] as Decode<'r, Sqlite>>::decode(value)?),
            "TEXT" => StorageValue::Text(<&str as Decode<'r, Sqlite>>::decode(value)?),
            "REAL" => StorageValue::Real(<f64 as Decode<'r, Sqlite>>::decode(value)?),
            _ => StorageValue::Integer(<i64 as Decode<'r, Sqlite>>::decode(value)?),
        };
        Ok(JsonColumn::from_storage(raw)?)
    }
}
