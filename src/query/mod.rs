//! Query construction for cursor pagination
//!
//! # Overview
//!
//! Everything here is a pure function of the request: direction resolution
//! picks the comparison operator and scan order once per call, and the
//! builders turn an anchor position into an immutable filter plus sort
//! specification. Filters are a typed tagged union evaluated by the store
//! adapter; no open-ended predicate maps are mutated across branches.

use regex::Regex;
use std::cmp::Ordering;

use crate::cursor::Anchor;
use crate::types::{DocumentId, SortField, SortKey, SortOrder, SortValue};


// ============================================================================
// Comparison and Direction
// ============================================================================

/// Comparison operator used in anchor predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compare {
    /// Strictly greater than
    Gt,
    /// Strictly less than
    Lt,
}

impl Compare {
    /// The opposite comparison
    pub fn flipped(self) -> Self {
        match self {
            Self::Gt => Self::Lt,
            Self::Lt => Self::Gt,
        }
    }

    /// Check whether an ordering result satisfies this comparison
    pub fn matches(self, ordering: Ordering) -> bool {
        match self {
            Self::Gt => ordering == Ordering::Greater,
            Self::Lt => ordering == Ordering::Less,
        }
    }
}

/// Which cursor a request carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// `prevCursor`: fetch the page immediately before the position
    Prev,
    /// `nextCursor`: fetch the page immediately after the position
    Next,
}

/// Comparison operator and scan order derived once per request.
///
/// Threaded through all query sites so the direction logic lives in exactly
/// one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    /// Operator for the anchor filter
    pub op: Compare,
    /// Order rows are fetched in; differs from the request order when
    /// paging backward
    pub scan: SortOrder,
}

/// Comparison that moves toward the end of the collection in `order`
pub fn forward_op(order: SortOrder) -> Compare {
    match order {
        SortOrder::Asc => Compare::Gt,
        SortOrder::Desc => Compare::Lt,
    }
}

/// Comparison that moves toward the start of the collection in `order`
pub fn backward_op(order: SortOrder) -> Compare {
    forward_op(order).flipped()
}

/// Resolve the comparison operator and scan order for a request.
///
/// Backward pages temporarily re-sort in the opposite scan order so the
/// nearest rows on the other side of the cursor are fetched first, bounded
/// by the page size; the fetched rows are reversed afterwards.
///
/// | order | cursor | op      | scan  |
/// |-------|--------|---------|-------|
/// | desc  | prev   | gt      | asc   |
/// | desc  | next   | lt      | desc  |
/// | asc   | prev   | lt      | desc  |
/// | asc   | next   | gt      | asc   |
/// | any   | none   | forward | order |
///
/// First pages build no anchor filter, so their operator is never applied;
/// it is resolved to the forward operator for uniformity.
pub fn resolve_direction(order: SortOrder, side: Option<Side>) -> Direction {
    match side {
        Some(Side::Prev) => Direction {
            op: backward_op(order),
            scan: order.reversed(),
        },
        Some(Side::Next) | None => Direction {
            op: forward_op(order),
            scan: order,
        },
    }
}

// ============================================================================
// Filter Language
// ============================================================================

/// A single typed predicate, evaluated by the store adapter
#[derive(Debug, Clone)]
pub enum Predicate<K> {
    /// `_id <op> id`
    IdCmp { op: Compare, id: DocumentId },
    /// `field <op> value`
    FieldCmp {
        field: K,
        op: Compare,
        value: SortValue,
    },
    /// `field == value`
    FieldEq { field: K, value: SortValue },
    /// Rendered field text matches the pattern
    FieldMatches { field: K, pattern: Regex },
}

/// Composable filter over documents.
///
/// `All` matches everything and is the identity of [`Filter::and`].
#[derive(Debug, Clone, Default)]
pub enum Filter<K> {
    /// Match every document
    #[default]
    All,
    /// A single predicate
    Pred(Predicate<K>),
    /// Conjunction
    And(Vec<Filter<K>>),
    /// Disjunction
    Or(Vec<Filter<K>>),
}

impl<K> Filter<K> {
    /// Conjunction of two filters, flattening nested conjunctions
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::All, f) | (f, Self::All) => f,
            (Self::And(mut a), Self::And(b)) => {
                a.extend(b);
                Self::And(a)
            }
            (Self::And(mut a), f) => {
                a.push(f);
                Self::And(a)
            }
            (f, Self::And(mut b)) => {
                b.insert(0, f);
                Self::And(b)
            }
            (a, b) => Self::And(vec![a, b]),
        }
    }
}

// ============================================================================
// Sort Specification
// ============================================================================

/// Sort specification for a page query: the sort field (when not sorting by
/// identifier) followed by the identifier tie-break, both in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<K> {
    /// Field component, absent for identifier sorts
    pub field: Option<(K, SortOrder)>,
    /// Identifier component, always present
    pub id: SortOrder,
}

/// Build the sort specification for a sort field and scan order
pub fn sort_spec<K: SortKey>(sort: SortField<K>, scan: SortOrder) -> SortSpec<K> {
    SortSpec {
        field: match sort {
            SortField::Id => None,
            SortField::Key(key) => Some((key, scan)),
        },
        id: scan,
    }
}

// ============================================================================
// Query Builders
// ============================================================================

/// Filter selecting rows strictly past `anchor` in the direction of `op`.
///
/// Identifier sorts compare the identifier alone. Field sorts need the
/// disjunction `(field <op> v) OR (field == v AND _id <op> id)` because the
/// sort field may not be unique; the identifier is the guaranteed tie-break.
pub fn anchor_filter<K: SortKey>(
    sort: SortField<K>,
    anchor: &Anchor,
    op: Compare,
) -> Filter<K> {
    match (sort, &anchor.value) {
        (SortField::Key(field), Some(value)) => Filter::Or(vec![
            Filter::Pred(Predicate::FieldCmp {
                field,
                op,
                value: value.clone(),
            }),
            Filter::And(vec![
                Filter::Pred(Predicate::FieldEq {
                    field,
                    value: value.clone(),
                }),
                Filter::Pred(Predicate::IdCmp { op, id: anchor.id }),
            ]),
        ]),
        _ => Filter::Pred(Predicate::IdCmp { op, id: anchor.id }),
    }
}

/// Build the page query: the caller's base filter, optionally conjoined with
/// the anchor filter, plus the sort specification in scan order.
///
/// First pages have no anchor and therefore no anchor filter; the sort
/// specification still applies.
pub fn page_query<K: SortKey>(
    sort: SortField<K>,
    base: &Filter<K>,
    anchor: Option<&Anchor>,
    direction: Direction,
) -> (Filter<K>, SortSpec<K>) {
    let filter = match anchor {
        Some(anchor) => base.clone().and(anchor_filter(sort, anchor, direction.op)),
        None => base.clone(),
    };
    (filter, sort_spec(sort, direction.scan))
}
