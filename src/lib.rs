//! # Seekpage
//!
//! Bidirectional cursor pagination over document collections, ordered by an
//! arbitrary sortable field. Pages are addressed by an opaque compound
//! cursor (document identifier plus sort-field value) instead of numeric
//! offsets, which avoids the two classic failure modes of offset
//! pagination: rows skipped or duplicated under concurrent writes, and the
//! O(n) skip cost of deep pages.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use seekpage::{paginate, PaginationRequest, SortField, SortOrder};
//! use std::num::NonZeroUsize;
//!
//! #[tokio::main]
//! async fn main() -> seekpage::Result<()> {
//!     // `questions` is any Collection implementation; QuestionField is the
//!     // caller-defined SortKey enum for the document type.
//!     let request = PaginationRequest::new(
//!         SortField::Key(QuestionField::Rating),
//!         SortOrder::Asc,
//!         NonZeroUsize::new(20).unwrap(),
//!     );
//!
//!     let page = paginate(&questions, &request).await?;
//!     if let Some(token) = page.meta.next_cursor {
//!         let next = paginate(&questions, &request.clone().after(token)).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! request ──► direction resolver ──► query builder ──► page fetch
//!                                        │                 │
//!                                        └──► probes ◄─────┘
//!                                               │
//!                                        result assembly ──► Page + meta
//! ```
//!
//! The engine is stateless and never writes; the store handle owns all
//! consistency discipline. There is no snapshot guarantee across the page
//! fetch and the two adjacency probes.

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the engine
pub mod error;

/// Core value types and capability traits
pub mod types;

/// Cursor token codec
pub mod cursor;

/// Direction resolution and query building
pub mod query;

/// Collection handle abstraction and the in-memory adapter
pub mod store;

/// Page fetch and result assembly
pub mod page;

// ============================================================================
// Re-exports
// ============================================================================

pub use cursor::{Anchor, CursorToken};
pub use error::{Error, Result};
pub use page::{paginate, Page, PageMeta, PaginationRequest};
pub use query::{Compare, Direction, Filter, Predicate, Side, SortSpec};
pub use store::{Collection, MemoryCollection};
pub use types::{
    Document, DocumentId, KeyOf, SortField, SortKey, SortOrder, SortValue, ValueKind,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
