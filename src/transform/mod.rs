//! Per-dataset transforms.
//!
//! Each dataset implements [`Transformer`] once, and both pipeline variants are
//! driven from that single description:
//!
//! - [`transform_local`] filters and projects the raw table, then pivots it into a
//!   [`PivotTable`] with one column per `REF_DATE`.
//! - [`transform_distributed`] maps every raw row to a flat, typed record (trimmed
//!   strings, numeric `VALUE`, derived `Year`) through a [`BatchExecutor`], grouped
//!   by `(Year, GEO)` for the partitioned writer.

pub mod monthly;
pub mod naics;
pub mod quarterly;

pub use monthly::{Monthly, MonthlyRecord};
pub use naics::{Naics, NaicsRecord};
pub use quarterly::{Quarterly, QuarterlyRecord};

use crate::dataset::{Dataset, REF_DATE, VALUE};
use crate::error::EtlError;
use crate::partition::{PartitionedRecord, PartitionedRows};
use crate::pivot::{PivotBuilder, PivotTable};
use crate::runner::BatchExecutor;
use crate::table::RawTable;
use crate::values::coerce_value;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

/// Dataset-specific half of a transform.
pub trait Transformer {
    /// Flat output row of the partitioned pipeline.
    type Record: PartitionedRecord
        + Serialize
        + Deserialize<'static>
        + Clone
        + Debug
        + Send
        + Sync;

    /// Column positions resolved once per table.
    type Columns: Sync;

    const DATASET: Dataset;

    /// Row index of the pivot, in source column names.
    const PIVOT_INDEX: &'static [&'static str];

    /// Resolve the columns [`Transformer::record`] reads.
    ///
    /// # Errors
    /// [`EtlError::MalformedInput`] if one is missing.
    fn resolve(table: &RawTable) -> Result<Self::Columns, EtlError>;

    /// Map one raw row to an output record; `None` drops the row.
    fn record(cols: &Self::Columns, row: &[String]) -> Option<Self::Record>;

    /// Row filter applied by the local pipeline before projection.
    ///
    /// # Errors
    /// [`EtlError::MalformedInput`] if a filtered column is missing.
    fn filter_local(table: &RawTable) -> Result<RawTable, EtlError> {
        Ok(table.clone())
    }
}

/// Columns kept by the local projection: `REF_DATE`, the pivot index, `VALUE`.
#[must_use]
pub fn local_columns<X: Transformer>() -> Vec<&'static str> {
    let mut cols = Vec::with_capacity(X::PIVOT_INDEX.len() + 2);
    cols.push(REF_DATE);
    cols.extend_from_slice(X::PIVOT_INDEX);
    cols.push(VALUE);
    cols
}

/// Filter and project a raw table for the local pivot.
///
/// # Errors
/// [`EtlError::MalformedInput`] if a required column is missing.
pub fn select_local<X: Transformer>(table: &RawTable) -> Result<RawTable, EtlError> {
    X::filter_local(table)?.select(&local_columns::<X>())
}

/// Local pipeline transform: filter, project, pivot.
///
/// Rows with an empty `REF_DATE` or index cell are skipped. All-null pivot rows and
/// periods are dropped by [`PivotBuilder::finish`].
///
/// # Errors
/// [`EtlError::MalformedInput`] if a required column is missing.
pub fn transform_local<X: Transformer>(table: &RawTable) -> Result<PivotTable> {
    let selected = select_local::<X>(table)?;
    let last = X::PIVOT_INDEX.len() + 1;

    let mut pivot = PivotBuilder::new(X::PIVOT_INDEX);
    // A row with an empty period or key cell has nowhere to go in the pivot.
    for row in selected.rows().iter().filter(|r| r[..last].iter().all(|c| !c.is_empty())) {
        pivot.push(row[1..last].to_vec(), &row[0], coerce_value(&row[last]));
    }
    let pivot = pivot.finish();
    debug!(
        dataset = %X::DATASET,
        input_rows = table.len(),
        kept_rows = selected.len(),
        pivot_rows = pivot.len(),
        periods = pivot.periods().len(),
        "pivoted"
    );
    Ok(pivot)
}

/// Partitioned pipeline transform: one typed record per surviving row, grouped by
/// `(Year, GEO)`.
///
/// # Errors
/// [`EtlError::MalformedInput`] if a required column is missing, or whatever the
/// executor reports.
pub fn transform_distributed<X, E>(table: RawTable, exec: &E) -> Result<PartitionedRows<X::Record>>
where
    X: Transformer,
    E: BatchExecutor,
{
    let cols = X::resolve(&table)?;
    let input_rows = table.len();
    let out = exec.run(
        table.into_rows(),
        |row: &Vec<String>| X::record(&cols, row),
        |rec: &X::Record| rec.partition_key(),
    )?;
    debug!(
        dataset = %X::DATASET,
        input_rows,
        output_rows = out.values().map(Vec::len).sum::<usize>(),
        partitions = out.len(),
        "transformed"
    );
    Ok(out)
}
