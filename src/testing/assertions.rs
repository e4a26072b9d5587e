//! Assertion functions for pipeline outputs.
//!
//! These panic with messages that show the whole relevant output, which is what
//! one wants to read when a pivot or a partition tree comes out wrong.

use crate::error::{ErrorKind, EtlError};
use crate::load::{PART_FILE, SUCCESS_MARKER};
use crate::pivot::PivotTable;
use std::fmt::Debug;

/// Assert that a pivot cell holds `expected`.
///
/// `expected` is the cell itself: `None` for a null cell.
///
/// # Panics
///
/// Panics if the key or period is not in the table, or the cell differs.
///
/// # Example
///
/// ```
/// use labour_etl::PivotBuilder;
/// use labour_etl::testing::assert_pivot_cell;
///
/// let mut b = PivotBuilder::new(&["GEO"]);
/// b.push(vec!["Ontario".into()], "2020-01", Some(4.0));
/// assert_pivot_cell(&b.finish(), &["Ontario"], "2020-01", Some(4.0));
/// ```
pub fn assert_pivot_cell(pivot: &PivotTable, key: &[&str], period: &str, expected: Option<f64>) {
    match pivot.cell(key, period) {
        Some(actual) => assert_eq!(
            actual, expected,
            "Pivot cell mismatch at {key:?} / {period}:\n  \
             Expected: {expected:?}\n  Actual: {actual:?}"
        ),
        None => panic!(
            "Pivot has no cell {key:?} / {period}:\n  Periods: {:?}\n  Keys: {:?}",
            pivot.periods(),
            pivot.rows().iter().map(|r| &r.key).collect::<Vec<_>>()
        ),
    }
}

/// Assert that a partitioned output holds exactly `dirs` plus the success marker.
///
/// `keys` are object keys relative to the output prefix, as returned by
/// [`MemoryStore::keys_under`](crate::io::memory::MemoryStore::keys_under);
/// `dirs` are partition directories such as `Year=2021/GEO=Ontario`.
///
/// # Panics
///
/// Panics if a partition is missing, an unexpected object is present, or the
/// success marker is absent.
pub fn assert_partition_layout<S: AsRef<str>>(keys: &[String], dirs: &[S]) {
    let mut expected: Vec<String> = dirs
        .iter()
        .map(|d| format!("{}/{PART_FILE}", d.as_ref()))
        .collect();
    expected.push(SUCCESS_MARKER.to_string());
    expected.sort();

    let mut actual = keys.to_vec();
    actual.sort();
    assert_eq!(
        actual, expected,
        "Partition layout mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}

/// Assert that `result` failed with an [`EtlError`] of the given kind.
///
/// # Panics
///
/// Panics if `result` is `Ok`, or its error chain carries no [`EtlError`] of
/// that kind.
pub fn assert_error_kind<T: Debug>(result: &anyhow::Result<T>, kind: ErrorKind) {
    match result {
        Ok(v) => panic!("Expected a {kind:?} error, got Ok({v:?})"),
        Err(e) => assert_eq!(
            EtlError::kind_of(e),
            Some(kind),
            "Error kind mismatch:\n  Expected: {kind:?}\n  Error: {e:#}"
        ),
    }
}

/// Assert that every element satisfies `predicate`.
///
/// # Panics
///
/// Panics naming the first element that does not.
pub fn assert_all<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    for (i, item) in collection.iter().enumerate() {
        assert!(
            predicate(item),
            "Predicate failed at index {i}: {item:?}\n  Full collection: {collection:?}"
        );
    }
}
