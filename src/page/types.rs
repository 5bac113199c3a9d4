//! Request and response types for pagination

use serde::Serialize;
use std::num::NonZeroUsize;

use crate::cursor::CursorToken;
use crate::query::{Filter, Side};
use crate::types::{SortField, SortKey, SortOrder};

// ============================================================================
// Pagination Request
// ============================================================================

/// Caller-supplied pagination descriptor, immutable per call.
///
/// At most one of the cursors may be present: `prev_cursor` means "fetch the
/// page immediately before this position", `next_cursor` "immediately after".
/// Neither present denotes the first page in `order`.
#[derive(Debug, Clone)]
pub struct PaginationRequest<K> {
    /// Field to order by
    pub sort: SortField<K>,
    /// Caller-visible ordering
    pub order: SortOrder,
    /// Maximum rows to return
    pub page_size: NonZeroUsize,
    /// Position to page backward from
    pub prev_cursor: Option<CursorToken>,
    /// Position to page forward from
    pub next_cursor: Option<CursorToken>,
    /// Caller-supplied predicates, conjoined into every query unchanged
    pub filter: Filter<K>,
}

impl<K: SortKey> PaginationRequest<K> {
    /// Request for the first page in `order`
    pub fn new(sort: SortField<K>, order: SortOrder, page_size: NonZeroUsize) -> Self {
        Self {
            sort,
            order,
            page_size,
            prev_cursor: None,
            next_cursor: None,
            filter: Filter::All,
        }
    }

    /// Page forward from a cursor returned in a previous page's metadata
    #[must_use]
    pub fn after(mut self, token: CursorToken) -> Self {
        self.next_cursor = Some(token);
        self.prev_cursor = None;
        self
    }

    /// Page backward from a cursor returned in a previous page's metadata
    #[must_use]
    pub fn before(mut self, token: CursorToken) -> Self {
        self.prev_cursor = Some(token);
        self.next_cursor = None;
        self
    }

    /// Attach caller-supplied predicates
    #[must_use]
    pub fn with_filter(mut self, filter: Filter<K>) -> Self {
        self.filter = filter;
        self
    }

    /// Which cursor the request carries, if any. A backward cursor wins if
    /// a caller violates the exclusivity invariant and supplies both.
    pub(crate) fn side(&self) -> Option<(Side, &CursorToken)> {
        if let Some(token) = &self.prev_cursor {
            Some((Side::Prev, token))
        } else {
            self.next_cursor.as_ref().map(|token| (Side::Next, token))
        }
    }
}

// ============================================================================
// Paginated Result
// ============================================================================

/// One page of documents plus navigation metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Matched documents in the caller-visible order, at most `page_size`
    pub data: Vec<T>,
    /// Navigation metadata
    pub meta: PageMeta,
}

/// Navigation metadata of a page.
///
/// The serialized key names are a wire contract consumed by the transport
/// layer: `cursor`, `order`, `hasNext`, `hasPrev`, `nextCursor`, `prevCursor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Name of the sort field (`_id` for identifier sorts)
    pub cursor: String,
    /// Caller-visible ordering
    pub order: SortOrder,
    /// Whether a page exists after this one
    pub has_next: bool,
    /// Whether a page exists before this one
    pub has_prev: bool,
    /// Cursor for the following page, present iff `has_next`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<CursorToken>,
    /// Cursor for the preceding page, present iff `has_prev`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_cursor: Option<CursorToken>,
}

impl PageMeta {
    /// Metadata with both flags down and no tokens
    pub fn empty<K: SortKey>(sort: SortField<K>, order: SortOrder) -> Self {
        Self {
            cursor: sort.name().to_string(),
            order,
            has_next: false,
            has_prev: false,
            next_cursor: None,
            prev_cursor: None,
        }
    }
}
