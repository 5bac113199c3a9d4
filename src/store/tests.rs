//! Tests for the in-memory collection adapter

use super::memory::matches;
use super::*;
use crate::query::{sort_spec, Compare, Predicate};
use crate::types::{DocumentId, SortField, SortKey, SortOrder, SortValue, ValueKind};
use pretty_assertions::assert_eq;
use regex::Regex;

#[derive(Debug, Clone, Copy)]
enum Field {
    Rating,
    Title,
}

impl SortKey for Field {
    fn name(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Title => "title",
        }
    }

    fn kind(&self) -> ValueKind {
        match self {
            Self::Rating => ValueKind::Int,
            Self::Title => ValueKind::Str,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Question {
    id: DocumentId,
    rating: i64,
    title: String,
}

impl Document for Question {
    type Key = Field;

    fn id(&self) -> DocumentId {
        self.id
    }

    fn sort_value(&self, key: Field) -> SortValue {
        match key {
            Field::Rating => SortValue::Int(self.rating),
            Field::Title => SortValue::Str(self.title.clone()),
        }
    }
}

fn oid(n: u8) -> DocumentId {
    let mut bytes = [0u8; 12];
    bytes[11] = n;
    DocumentId::from_bytes(bytes)
}

fn question(n: u8, rating: i64, title: &str) -> Question {
    Question {
        id: oid(n),
        rating,
        title: title.to_string(),
    }
}

fn collection() -> MemoryCollection<Question> {
    MemoryCollection::new(vec![
        question(3, 2, "gamma"),
        question(1, 1, "alpha"),
        question(5, 4, "epsilon"),
        question(2, 2, "beta"),
        question(4, 3, "delta"),
    ])
}

fn ids(rows: &[Question]) -> Vec<u8> {
    rows.iter().map(|q| q.id.as_bytes()[11]).collect()
}

// ============================================================================
// Find Tests
// ============================================================================

#[tokio::test]
async fn test_find_orders_by_field_with_id_tie_break() {
    let rows = collection()
        .find(
            &Filter::All,
            &sort_spec(SortField::Key(Field::Rating), SortOrder::Asc),
            10,
        )
        .await
        .unwrap();

    // ratings [1, 2, 2, 3, 4]; the duplicate rating 2 resolves by id
    assert_eq!(ids(&rows), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_find_descending() {
    let rows = collection()
        .find(
            &Filter::All,
            &sort_spec(SortField::Key(Field::Rating), SortOrder::Desc),
            10,
        )
        .await
        .unwrap();

    assert_eq!(ids(&rows), vec![5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn test_find_id_sort() {
    let rows = collection()
        .find(&Filter::All, &sort_spec(SortField::Id, SortOrder::Desc), 10)
        .await
        .unwrap();

    assert_eq!(ids(&rows), vec![5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn test_find_respects_limit() {
    let rows = collection()
        .find(&Filter::All, &sort_spec(SortField::Id, SortOrder::Asc), 2)
        .await
        .unwrap();

    assert_eq!(ids(&rows), vec![1, 2]);
}

#[tokio::test]
async fn test_find_one() {
    let store = collection();

    let hit = store
        .find_one(&Filter::Pred(Predicate::FieldEq {
            field: Field::Rating,
            value: SortValue::Int(3),
        }))
        .await
        .unwrap();
    assert_eq!(hit, Some(question(4, 3, "delta")));

    let miss = store
        .find_one(&Filter::Pred(Predicate::FieldEq {
            field: Field::Rating,
            value: SortValue::Int(9),
        }))
        .await
        .unwrap();
    assert_eq!(miss, None);
}

// ============================================================================
// Predicate Evaluation Tests
// ============================================================================

#[test]
fn test_id_compare_predicate() {
    let doc = question(3, 2, "gamma");

    let gt = Filter::Pred(Predicate::IdCmp {
        op: Compare::Gt,
        id: oid(2),
    });
    let lt = Filter::Pred(Predicate::IdCmp {
        op: Compare::Lt,
        id: oid(3),
    });
    assert!(matches(&gt, &doc));
    assert!(!matches(&lt, &doc));
}

#[test]
fn test_field_compare_predicate() {
    let doc = question(3, 2, "gamma");

    let filter = Filter::Pred(Predicate::FieldCmp {
        field: Field::Rating,
        op: Compare::Lt,
        value: SortValue::Int(3),
    });
    assert!(matches(&filter, &doc));

    // equal is not strictly less
    let filter = Filter::Pred(Predicate::FieldCmp {
        field: Field::Rating,
        op: Compare::Lt,
        value: SortValue::Int(2),
    });
    assert!(!matches(&filter, &doc));
}

#[test]
fn test_cross_kind_comparison_matches_nothing() {
    let doc = question(3, 2, "gamma");

    let filter = Filter::Pred(Predicate::FieldCmp {
        field: Field::Rating,
        op: Compare::Lt,
        value: SortValue::Str("zzz".into()),
    });
    assert!(!matches(&filter, &doc));
}

#[test]
fn test_regex_predicate() {
    let doc = question(3, 2, "gamma");

    let filter = Filter::Pred(Predicate::FieldMatches {
        field: Field::Title,
        pattern: Regex::new("^ga").unwrap(),
    });
    assert!(matches(&filter, &doc));

    let filter = Filter::Pred(Predicate::FieldMatches {
        field: Field::Title,
        pattern: Regex::new("^delta$").unwrap(),
    });
    assert!(!matches(&filter, &doc));
}

#[test]
fn test_boolean_composition() {
    let doc = question(3, 2, "gamma");

    let eq = |n: i64| {
        Filter::Pred(Predicate::FieldEq {
            field: Field::Rating,
            value: SortValue::Int(n),
        })
    };

    assert!(matches(&Filter::And(vec![Filter::All, eq(2)]), &doc));
    assert!(!matches(&Filter::And(vec![eq(2), eq(3)]), &doc));
    assert!(matches(&Filter::Or(vec![eq(3), eq(2)]), &doc));
    assert!(!matches(&Filter::Or(vec![eq(3), eq(4)]), &doc));
}

// ============================================================================
// Mutation Helper Tests
// ============================================================================

#[test]
fn test_insert_and_remove() {
    let mut store = MemoryCollection::new(vec![question(1, 1, "alpha")]);
    assert_eq!(store.len(), 1);
    assert!(!store.is_empty());

    store.insert(question(2, 2, "beta"));
    assert_eq!(store.len(), 2);

    assert!(store.remove(oid(1)));
    assert!(!store.remove(oid(1)));
    assert_eq!(store.len(), 1);
}
