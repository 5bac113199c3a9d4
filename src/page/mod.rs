//! Pagination engine: page fetch and result assembly
//!
//! # Overview
//!
//! [`paginate`] runs one pagination call end to end: decode the cursor,
//! resolve the scan direction, fetch the page, then probe both adjacent
//! positions to derive `has_next`/`has_prev` and the outgoing cursor tokens.
//!
//! The engine is stateless; every value here is request-scoped. A call
//! issues up to three reads against the store (page fetch plus two probes)
//! with no snapshot guarantee across them: a concurrent write between the
//! fetch and a probe can leave a navigation flag stale by the time the
//! caller acts on it. That weak-consistency trade-off is inherent to cursor
//! pagination over a mutable collection and is accepted, not worked around.

mod types;

pub use types::{Page, PageMeta, PaginationRequest};

use tracing::debug;

use crate::cursor::{Anchor, CursorToken};
use crate::error::Result;
use crate::query::{
    anchor_filter, backward_op, forward_op, page_query, resolve_direction, Compare, Filter, Side,
};
use crate::store::Collection;
use crate::types::{Document, KeyOf};


/// Fetch one page and assemble its navigation metadata.
///
/// A malformed cursor fails before any store traffic; store failures
/// propagate unchanged. Returns a complete page or an error, never a mix.
pub async fn paginate<C: Collection>(
    collection: &C,
    request: &PaginationRequest<KeyOf<C::Doc>>,
) -> Result<Page<C::Doc>> {
    let side = request.side();

    let (anchor, direction) = match side {
        Some((side, token)) => {
            let anchor = token.decode(request.sort)?;
            (Some(anchor), resolve_direction(request.order, Some(side)))
        }
        None => (None, resolve_direction(request.order, None)),
    };

    let (filter, sort) = page_query(request.sort, &request.filter, anchor.as_ref(), direction);

    debug!(
        sort = request.sort.name(),
        order = ?request.order,
        scan = ?direction.scan,
        size = request.page_size.get(),
        "fetching page"
    );

    let mut data = collection
        .find(&filter, &sort, request.page_size.get())
        .await?;

    // Backward pages are fetched in reverse scan order to bound the read;
    // restore the caller-visible ordering.
    if matches!(side, Some((Side::Prev, _))) {
        data.reverse();
    }

    let mut meta = PageMeta::empty(request.sort, request.order);

    if let (Some(first), Some(last)) = (data.first(), data.last()) {
        let next_filter = probe_filter(request, last, forward_op(request.order));
        let prev_filter = probe_filter(request, first, backward_op(request.order));

        // Independent reads; ordering between them is irrelevant.
        let (next_hit, prev_hit) = tokio::join!(
            collection.find_one(&next_filter),
            collection.find_one(&prev_filter),
        );
        meta.has_next = next_hit?.is_some();
        meta.has_prev = prev_hit?.is_some();

        if meta.has_next {
            meta.next_cursor = Some(CursorToken::encode(last, request.sort));
        }
        if meta.has_prev {
            meta.prev_cursor = Some(CursorToken::encode(first, request.sort));
        }

        debug!(
            has_next = meta.has_next,
            has_prev = meta.has_prev,
            rows = data.len(),
            "page assembled"
        );
    }

    Ok(Page { data, meta })
}

/// Existence-probe filter: the anchor filter shape of the page query,
/// anchored at a boundary row of the fetched page, conjoined with the
/// caller's base filter.
fn probe_filter<D: Document>(
    request: &PaginationRequest<D::Key>,
    boundary: &D,
    op: Compare,
) -> Filter<D::Key> {
    let anchor = Anchor::from_doc(boundary, request.sort);
    request
        .filter
        .clone()
        .and(anchor_filter(request.sort, &anchor, op))
}
