//! Collection handle abstraction
//!
//! The engine consumes a document store only through the [`Collection`]
//! trait: a bounded ordered fetch and a single-row existence lookup. The
//! store owns its own locking and consistency discipline; the engine treats
//! it as an eventually-consistent read source and never writes.

mod memory;

pub use memory::MemoryCollection;

use async_trait::async_trait;

use crate::error::Result;
use crate::query::{Filter, SortSpec};
use crate::types::{Document, KeyOf};

#[cfg(test)]
mod tests;

/// Query-capable handle over a document collection.
///
/// Adapters map the typed filter language onto their store's native query
/// form; [`MemoryCollection`] is the reference evaluation.
#[async_trait]
pub trait Collection: Send + Sync {
    /// Document type stored in the collection
    type Doc: Document;

    /// Fetch up to `limit` documents matching `filter`, ordered by `sort`
    async fn find(
        &self,
        filter: &Filter<KeyOf<Self::Doc>>,
        sort: &SortSpec<KeyOf<Self::Doc>>,
        limit: usize,
    ) -> Result<Vec<Self::Doc>>;

    /// Fetch a single document matching `filter`, if one exists
    async fn find_one(
        &self,
        filter: &Filter<KeyOf<Self::Doc>>,
    ) -> Result<Option<Self::Doc>>;
}
