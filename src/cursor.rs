//! Cursor token codec
//!
//! A cursor token is the textual position of a page boundary row:
//! `<documentId>` when sorting by the identifier, `<documentId>_<sortValue>`
//! when sorting by any other field. Tokens are produced only from the
//! boundary rows of a returned page and are opaque to callers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::types::{Document, DocumentId, SortField, SortKey, SortValue};

/// Separator between the identifier and sort-value segments
pub const SEPARATOR: char = '_';

// ============================================================================
// Cursor Token
// ============================================================================

/// Opaque pagination cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CursorToken(String);

impl CursorToken {
    /// Wrap a raw token received from a client
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encode the position of a boundary row.
    ///
    /// Emits the identifier alone for an identifier sort, otherwise the
    /// identifier and the row's sort-field value joined by the separator.
    pub fn encode<D: Document>(doc: &D, sort: SortField<D::Key>) -> Self {
        match sort {
            SortField::Id => Self(doc.id().to_string()),
            SortField::Key(key) => Self(format!(
                "{}{SEPARATOR}{}",
                doc.id(),
                doc.sort_value(key)
            )),
        }
    }

    /// Decode the token into an anchor position for the given sort field.
    ///
    /// The value segment is parsed according to the field's scalar kind, so
    /// a timestamp field gets its timestamp reconstructed from RFC 3339 text.
    /// Fails with a malformed cursor error before any store query is issued.
    pub fn decode<K: SortKey>(&self, sort: SortField<K>) -> Result<Anchor> {
        // split once so sort values containing the separator survive intact
        let (id_text, value_text) = match self.0.split_once(SEPARATOR) {
            Some((id, value)) => (id, Some(value)),
            None => (self.0.as_str(), None),
        };

        let id: DocumentId = id_text.parse()?;

        let value = match (sort.value_kind(), value_text) {
            (Some(kind), Some(text)) => Some(SortValue::parse(kind, text)?),
            (Some(_), None) => {
                return Err(Error::malformed_cursor(format!(
                    "missing sort value segment for field {:?}",
                    sort.name()
                )))
            }
            (None, Some(_)) => {
                return Err(Error::malformed_cursor(
                    "unexpected sort value segment for identifier sort",
                ))
            }
            (None, None) => None,
        };

        Ok(Anchor { id, value })
    }
}

impl fmt::Display for CursorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Anchor
// ============================================================================

/// Decoded cursor position: the boundary row's identifier, plus its
/// sort-field value when sorting by a non-identifier field.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    /// Identifier of the boundary row
    pub id: DocumentId,
    /// Sort-field value of the boundary row, absent for identifier sorts
    pub value: Option<SortValue>,
}

impl Anchor {
    /// Anchor at an existing document, mirroring what its token would decode to
    pub fn from_doc<D: Document>(doc: &D, sort: SortField<D::Key>) -> Self {
        Self {
            id: doc.id(),
            value: match sort {
                SortField::Id => None,
                SortField::Key(key) => Some(doc.sort_value(key)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueKind;
    use chrono::{TimeZone, Utc};

    #[derive(Debug, Clone, Copy)]
    enum Field {
        Rating,
        Title,
        Created,
    }

    impl SortKey for Field {
        fn name(&self) -> &'static str {
            match self {
                Self::Rating => "rating",
                Self::Title => "title",
                Self::Created => "created",
            }
        }

        fn kind(&self) -> ValueKind {
            match self {
                Self::Rating => ValueKind::Int,
                Self::Title => ValueKind::Str,
                Self::Created => ValueKind::Timestamp,
            }
        }
    }

    #[derive(Clone)]
    struct Doc {
        id: DocumentId,
        rating: i64,
        title: String,
        created: chrono::DateTime<Utc>,
    }

    impl Document for Doc {
        type Key = Field;

        fn id(&self) -> DocumentId {
            self.id
        }

        fn sort_value(&self, key: Field) -> SortValue {
            match key {
                Field::Rating => SortValue::Int(self.rating),
                Field::Title => SortValue::Str(self.title.clone()),
                Field::Created => SortValue::Timestamp(self.created),
            }
        }
    }

    fn doc() -> Doc {
        Doc {
            id: "507f1f77bcf86cd799439011".parse().unwrap(),
            rating: 4,
            title: "under_score".to_string(),
            created: Utc.with_ymd_and_hms(2023, 5, 17, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_encode_id_sort() {
        let token = CursorToken::encode(&doc(), SortField::Id);
        assert_eq!(token.as_str(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_encode_field_sort() {
        let token = CursorToken::encode(&doc(), SortField::Key(Field::Rating));
        assert_eq!(token.as_str(), "507f1f77bcf86cd799439011_4");
    }

    #[test]
    fn test_decode_id_sort() {
        let token = CursorToken::new("507f1f77bcf86cd799439011");
        let anchor = token.decode::<Field>(SortField::Id).unwrap();
        assert_eq!(anchor.id.to_string(), "507f1f77bcf86cd799439011");
        assert_eq!(anchor.value, None);
    }

    #[test]
    fn test_decode_field_sort_roundtrip() {
        let sort = SortField::Key(Field::Rating);
        let token = CursorToken::encode(&doc(), sort);
        let anchor = token.decode(sort).unwrap();
        assert_eq!(anchor, Anchor::from_doc(&doc(), sort));
    }

    #[test]
    fn test_decode_preserves_separator_in_value() {
        let sort = SortField::Key(Field::Title);
        let token = CursorToken::encode(&doc(), sort);
        assert_eq!(token.as_str(), "507f1f77bcf86cd799439011_under_score");

        let anchor = token.decode(sort).unwrap();
        assert_eq!(anchor.value, Some(SortValue::Str("under_score".into())));
    }

    #[test]
    fn test_decode_timestamp_roundtrip() {
        let sort = SortField::Key(Field::Created);
        let token = CursorToken::encode(&doc(), sort);
        let anchor = token.decode(sort).unwrap();
        assert_eq!(anchor.value, Some(SortValue::Timestamp(doc().created)));
    }

    #[test]
    fn test_decode_rejects_bad_id() {
        let err = CursorToken::new("not-an-id")
            .decode::<Field>(SortField::Id)
            .unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_decode_rejects_bad_timestamp() {
        let token = CursorToken::new("507f1f77bcf86cd799439011_yesterday");
        let err = token.decode(SortField::Key(Field::Created)).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_decode_rejects_missing_value_segment() {
        let token = CursorToken::new("507f1f77bcf86cd799439011");
        let err = token.decode(SortField::Key(Field::Rating)).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_decode_rejects_stray_value_segment() {
        let token = CursorToken::new("507f1f77bcf86cd799439011_4");
        let err = token.decode::<Field>(SortField::Id).unwrap_err();
        assert!(err.is_client_error());
    }
}
