//! Extraction: raw delimited sources into [`RawTable`]s.
//!
//! The extractor does no filtering. It enforces the schema contract of each
//! dataset up front, so a missing column fails here with
//! [`EtlError::MalformedInput`] instead of somewhere inside a transform.

use crate::dataset::Dataset;
use crate::error::EtlError;
use crate::io::csv::read_csv_table;
use crate::io::glob::is_pattern;
use crate::io::store::ObjectStore;
use crate::table::RawTable;
use anyhow::{Context, Result};
use tracing::debug;

/// Reads dataset sources through an [`ObjectStore`].
pub struct Extractor<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ObjectStore + ?Sized> Extractor<'a, S> {
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Load `dataset` from `location`.
    ///
    /// Single-file datasets read exactly one object. The quarterly dataset (or any
    /// location containing glob characters) reads every match and concatenates them.
    ///
    /// # Errors
    /// [`EtlError::SourceUnavailable`] if nothing is found at `location`;
    /// [`EtlError::MalformedInput`] if a header lacks the dataset's columns.
    pub fn extract(&self, dataset: Dataset, location: &str) -> Result<RawTable> {
        let table = if dataset.is_multi_file() || is_pattern(location) {
            self.read_many(dataset, location)?
        } else {
            self.read_one(dataset, location)?
        };
        debug!(dataset = %dataset, rows = table.len(), "extracted");
        Ok(table)
    }

    fn read_one(&self, dataset: Dataset, location: &str) -> Result<RawTable> {
        let bytes = self.store.get(location)?;
        let table = read_csv_table(&bytes, location)?;
        table.require_columns(dataset.required_columns())?;
        Ok(table)
    }

    fn read_many(&self, dataset: Dataset, pattern: &str) -> Result<RawTable> {
        let files = self
            .store
            .list(pattern)
            .with_context(|| format!("list {pattern}"))?;
        if files.is_empty() {
            return Err(EtlError::source_unavailable(pattern).into());
        }
        debug!(dataset = %dataset, files = files.len(), pattern, "matched source files");

        let mut tables = Vec::with_capacity(files.len());
        for file in &files {
            tables.push(self.read_one(dataset, file)?);
        }
        Ok(RawTable::concat(pattern, tables))
    }
}
