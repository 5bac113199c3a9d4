//! In-memory collection adapter
//!
//! Reference evaluation of the typed filter language. Used by the test
//! suites and as the template semantics for real store adapters: a native
//! adapter must select and order the same rows this one does.

use async_trait::async_trait;
use std::cmp::Ordering;

use super::Collection;
use crate::error::Result;
use crate::query::{Filter, Predicate, SortSpec};
use crate::types::{Document, KeyOf};

/// Collection backed by a plain vector of documents
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection<D> {
    docs: Vec<D>,
}

impl<D: Document + Clone> MemoryCollection<D> {
    /// Create a collection over the given documents
    pub fn new(docs: Vec<D>) -> Self {
        Self { docs }
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Check whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Insert a document
    pub fn insert(&mut self, doc: D) {
        self.docs.push(doc);
    }

    /// Remove a document by identifier, returning whether it was present
    pub fn remove(&mut self, id: crate::types::DocumentId) -> bool {
        let before = self.docs.len();
        self.docs.retain(|doc| doc.id() != id);
        self.docs.len() != before
    }
}

#[async_trait]
impl<D: Document + Clone> Collection for MemoryCollection<D> {
    type Doc = D;

    async fn find(
        &self,
        filter: &Filter<KeyOf<D>>,
        sort: &SortSpec<KeyOf<D>>,
        limit: usize,
    ) -> Result<Vec<D>> {
        let mut rows: Vec<D> = self
            .docs
            .iter()
            .filter(|doc| matches(filter, *doc))
            .cloned()
            .collect();
        rows.sort_by(|a, b| compare_docs(sort, a, b));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn find_one(&self, filter: &Filter<KeyOf<D>>) -> Result<Option<D>> {
        Ok(self.docs.iter().find(|doc| matches(filter, *doc)).cloned())
    }
}

/// Evaluate a filter against a document
pub fn matches<D: Document>(filter: &Filter<KeyOf<D>>, doc: &D) -> bool {
    match filter {
        Filter::All => true,
        Filter::Pred(pred) => matches_predicate(pred, doc),
        Filter::And(parts) => parts.iter().all(|part| matches(part, doc)),
        Filter::Or(parts) => parts.iter().any(|part| matches(part, doc)),
    }
}

fn matches_predicate<D: Document>(pred: &Predicate<KeyOf<D>>, doc: &D) -> bool {
    match pred {
        Predicate::IdCmp { op, id } => op.matches(doc.id().cmp(id)),
        Predicate::FieldCmp { field, op, value } => doc
            .sort_value(*field)
            .compare(value)
            .is_some_and(|ordering| op.matches(ordering)),
        Predicate::FieldEq { field, value } => {
            doc.sort_value(*field).compare(value) == Some(Ordering::Equal)
        }
        Predicate::FieldMatches { field, pattern } => {
            pattern.is_match(&doc.sort_value(*field).to_string())
        }
    }
}

/// Order two documents by a sort specification: field component first, then
/// the identifier tie-break
fn compare_docs<D: Document>(spec: &SortSpec<KeyOf<D>>, a: &D, b: &D) -> Ordering {
    if let Some((key, order)) = spec.field {
        let by_field = a
            .sort_value(key)
            .compare(&b.sort_value(key))
            .unwrap_or(Ordering::Equal);
        let by_field = order.apply(by_field);
        if by_field != Ordering::Equal {
            return by_field;
        }
    }
    spec.id.apply(a.id().cmp(&b.id()))
}
