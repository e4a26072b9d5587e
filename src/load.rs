//! Loading: Parquet output with full-overwrite semantics.
//!
//! Two layouts are supported:
//! - a single Parquet file holding a [`PivotTable`] (local pipeline)
//! - a Hive-partitioned tree under a prefix (partitioned pipeline):
//!
//! ```text
//! <prefix>/_SUCCESS
//! <prefix>/Year=2021/GEO=Ontario/part-00000.snappy.parquet
//! <prefix>/Year=2021/GEO=Quebec/part-00000.snappy.parquet
//! ```
//!
//! Partition columns live only in the directory names. Every write replaces what
//! was at the location before; nothing is appended or merged.

use crate::error::EtlError;
use crate::io::parquet::{drop_columns, encode_batch, records_to_batch};
use crate::io::store::{ObjectStore, join_location};
use crate::partition::{PartitionedRecord, PartitionedRows};
use crate::pivot::PivotTable;
use anyhow::Result;
use serde::Serialize;

/// File name of the single data file written per partition.
pub const PART_FILE: &str = "part-00000.snappy.parquet";
/// Empty marker written at the root of a completed partitioned output.
pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// Writes transformed tables through an [`ObjectStore`].
pub struct Loader<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ObjectStore + ?Sized> Loader<'a, S> {
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Write a pivot as one Parquet file at `location`, replacing it.
    ///
    /// Returns the number of rows written.
    ///
    /// # Errors
    /// [`EtlError::WriteFailure`] if the file cannot be encoded or stored.
    pub fn write_pivot(&self, pivot: &PivotTable, location: &str) -> Result<usize> {
        let bytes = pivot
            .to_record_batch()
            .and_then(|batch| encode_batch(&batch))
            .map_err(|e| EtlError::write_failure(location, format!("{e:#}")))?;
        self.store.put(location, &bytes)?;
        Ok(pivot.len())
    }

    /// Write partitioned records under `prefix`, replacing the whole tree.
    ///
    /// Empty partitions get no directory. Returns the number of rows written.
    ///
    /// # Errors
    /// [`EtlError::WriteFailure`] if any partition cannot be encoded or the tree
    /// cannot be stored; prior content is then left in place.
    pub fn write_partitioned<T>(&self, rows: &PartitionedRows<T>, prefix: &str) -> Result<usize>
    where
        T: PartitionedRecord + Serialize + serde::Deserialize<'static>,
    {
        let mut objects = Vec::with_capacity(rows.len() + 1);
        let mut written = 0usize;
        for (key, records) in rows.iter().filter(|(_, r)| !r.is_empty()) {
            let rel = format!("{}/{PART_FILE}", key.dir());
            let bytes = records_to_batch(records)
                .and_then(|batch| drop_columns(&batch, &T::PARTITION_COLUMNS))
                .and_then(|batch| encode_batch(&batch))
                .map_err(|e| {
                    EtlError::write_failure(join_location(prefix, &rel), format!("{e:#}"))
                })?;
            objects.push((rel, bytes));
            written += records.len();
        }
        objects.push((SUCCESS_MARKER.to_string(), Vec::new()));

        self.store.replace_prefix(prefix, &objects)?;
        Ok(written)
    }
}
