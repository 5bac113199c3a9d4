//! Core value types shared across the pagination engine
//!
//! This module contains the document identifier, the scalar sort value,
//! the sort order, and the capability traits that document types implement
//! so the engine can read their sortable fields without dynamic field access.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

// ============================================================================
// Type Aliases
// ============================================================================

/// Sort key type of a document type
pub type KeyOf<D> = <D as Document>::Key;

// ============================================================================
// Document Identifier
// ============================================================================

/// 12-byte document identifier, rendered as 24 lowercase hex characters.
///
/// The byte order is the sort order, so identifier comparisons agree with
/// the textual form used inside cursor tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId([u8; 12]);

impl DocumentId {
    /// Create an identifier from raw bytes
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub const fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for DocumentId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 24 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::malformed_cursor(format!(
                "invalid document id: {s:?}"
            )));
        }
        let mut bytes = [0u8; 12];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|e| Error::malformed_cursor(format!("invalid document id: {e}")))?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for DocumentId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Sort Order
// ============================================================================

/// Direction of the caller-visible ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order
    #[default]
    Asc,
    /// Descending order
    Desc,
}

impl SortOrder {
    /// The opposite order
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply this order to a natural (ascending) comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

// ============================================================================
// Sort Values
// ============================================================================

/// Kind of scalar a sort field holds; drives cursor-segment parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Str,
    Int,
    Float,
    Timestamp,
}

/// Scalar value of a sortable field
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Str(String),
    Int(i64),
    Float(f64),
    Timestamp(DateTime<Utc>),
}

impl SortValue {
    /// Kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Str(_) => ValueKind::Str,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Timestamp(_) => ValueKind::Timestamp,
        }
    }

    /// Parse the textual cursor form of a value of the given kind.
    ///
    /// Timestamps are reconstructed from RFC 3339 text; anything that does
    /// not parse as the expected kind is a malformed cursor.
    pub fn parse(kind: ValueKind, text: &str) -> Result<Self> {
        match kind {
            ValueKind::Str => Ok(Self::Str(text.to_string())),
            ValueKind::Int => text
                .parse::<i64>()
                .map(Self::Int)
                .map_err(|_| Error::malformed_cursor(format!("invalid integer value: {text:?}"))),
            ValueKind::Float => text
                .parse::<f64>()
                .map(Self::Float)
                .map_err(|_| Error::malformed_cursor(format!("invalid float value: {text:?}"))),
            ValueKind::Timestamp => DateTime::parse_from_rfc3339(text)
                .map(|dt| Self::Timestamp(dt.with_timezone(&Utc)))
                .map_err(|_| {
                    Error::malformed_cursor(format!("invalid timestamp value: {text:?}"))
                }),
        }
    }

    /// Compare two values of the same kind.
    ///
    /// Returns `None` across kinds; a filter predicate that compares values
    /// of different kinds matches nothing. Floats use total ordering.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => Some(a.total_cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for SortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Timestamp(ts) => {
                f.write_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl From<&str> for SortValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for SortValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for SortValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for SortValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<DateTime<Utc>> for SortValue {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

// ============================================================================
// Capability Traits
// ============================================================================

/// A sortable field of a document type.
///
/// Implemented by a caller-defined field enum, so the set of supported sort
/// fields is resolved at compile time instead of by dynamic field lookup.
pub trait SortKey: Copy + fmt::Debug + Send + Sync + 'static {
    /// Serialized name of the field
    fn name(&self) -> &'static str;

    /// Kind of scalar the field holds
    fn kind(&self) -> ValueKind;
}

/// A document the engine can paginate over
pub trait Document: Send + Sync {
    /// Field enum of this document type
    type Key: SortKey;

    /// Unique document identifier; the tie-break for non-unique sort fields
    fn id(&self) -> DocumentId;

    /// Value of the given sort field
    fn sort_value(&self, key: Self::Key) -> SortValue;
}

// ============================================================================
// Sort Field
// ============================================================================

/// The field a pagination request orders by.
///
/// Sorting by the document identifier is distinguished from all other fields
/// because the identifier is unique and needs no tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField<K> {
    /// Order by the document identifier
    Id,
    /// Order by a document field, with the identifier as tie-break
    Key(K),
}

impl<K: SortKey> SortField<K> {
    /// Serialized name of the sort field (`_id` for the identifier)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "_id",
            Self::Key(key) => key.name(),
        }
    }

    /// Scalar kind carried in cursor tokens, `None` for the identifier sort
    pub fn value_kind(&self) -> Option<ValueKind> {
        match self {
            Self::Id => None,
            Self::Key(key) => Some(key.kind()),
        }
    }
}
