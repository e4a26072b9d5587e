//! Long-to-wide reshape for the local pipelines.
//!
//! Rows arrive as `(key, period, value)` triples. A single pass folds them into an
//! ordered map `key -> (period -> running mean)`, collecting the set of distinct
//! periods along the way; [`PivotBuilder::finish`] then materializes one row per key
//! with one cell per period. A `(key, period)` pair that never appeared becomes an
//! explicit `None` cell.
//!
//! Rows whose cells are all null are dropped, and so are periods that are null in
//! every row.
//!
//! When the same `(key, period)` pair occurs more than once, the cell holds the mean
//! of its non-null values. Keys and periods are emitted in ascending order.

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn get(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

/// Accumulates triples into a [`PivotTable`].
#[derive(Debug, Default)]
pub struct PivotBuilder {
    index_names: Vec<String>,
    periods: BTreeSet<String>,
    cells: BTreeMap<Vec<String>, BTreeMap<String, Mean>>,
}

impl PivotBuilder {
    /// Start a pivot whose row index is made of the named columns.
    pub fn new<S: AsRef<str>>(index_names: &[S]) -> Self {
        Self {
            index_names: index_names.iter().map(|s| s.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }

    /// Fold one observation into the pivot.
    pub fn push(&mut self, key: Vec<String>, period: &str, value: Option<f64>) {
        debug_assert_eq!(key.len(), self.index_names.len());
        if !self.periods.contains(period) {
            self.periods.insert(period.to_string());
        }
        self.cells
            .entry(key)
            .or_default()
            .entry(period.to_string())
            .or_default()
            .push(value);
    }

    #[must_use]
    pub fn finish(self) -> PivotTable {
        let cells = self.cells;
        let periods: Vec<String> = self
            .periods
            .into_iter()
            .filter(|p| {
                cells
                    .values()
                    .any(|by_period| by_period.get(p).and_then(|m| m.get()).is_some())
            })
            .collect();
        let rows = cells
            .into_iter()
            .map(|(key, by_period)| {
                let values = periods
                    .iter()
                    .map(|p| by_period.get(p).and_then(|m| m.get()))
                    .collect();
                PivotRow { key, values }
            })
            .filter(|row: &PivotRow| row.values.iter().any(Option::is_some))
            .collect();
        PivotTable {
            index_names: self.index_names,
            periods,
            rows,
        }
    }
}

/// One pivoted row: the composite key and one cell per period.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub key: Vec<String>,
    pub values: Vec<Option<f64>>,
}

/// Wide table produced by the local transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    index_names: Vec<String>,
    periods: Vec<String>,
    rows: Vec<PivotRow>,
}

impl PivotTable {
    #[must_use]
    pub fn index_names(&self) -> &[String] {
        &self.index_names
    }

    /// Distinct periods, ascending; one output column each.
    #[must_use]
    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    #[must_use]
    pub fn rows(&self) -> &[PivotRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a cell.
    ///
    /// The outer `Option` is `None` when the key or period is not part of the table;
    /// the inner one is the cell itself.
    #[must_use]
    pub fn cell(&self, key: &[&str], period: &str) -> Option<Option<f64>> {
        let col = self.periods.iter().position(|p| p == period)?;
        let row = self
            .rows
            .binary_search_by(|r| {
                r.key
                    .iter()
                    .map(String::as_str)
                    .cmp(key.iter().copied())
            })
            .ok()?;
        Some(self.rows[row].values[col])
    }

    /// Convert to an Arrow batch: index columns as non-null `Utf8`, then one
    /// nullable `Float64` column per period.
    ///
    /// # Errors
    /// Returns an error if Arrow rejects the assembled columns.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let mut fields = Vec::with_capacity(self.index_names.len() + self.periods.len());
        let mut columns: Vec<ArrayRef> = Vec::with_capacity(fields.capacity());

        for (i, name) in self.index_names.iter().enumerate() {
            fields.push(Field::new(name, DataType::Utf8, false));
            let col: StringArray = self.rows.iter().map(|r| Some(r.key[i].as_str())).collect();
            columns.push(Arc::new(col));
        }
        for (j, period) in self.periods.iter().enumerate() {
            fields.push(Field::new(period, DataType::Float64, true));
            let col: Float64Array = self.rows.iter().map(|r| r.values[j]).collect();
            columns.push(Arc::new(col));
        }

        RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
            .context("assemble pivot RecordBatch")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(parts: &[&str]) -> Vec<String> {
        parts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn missing_combinations_are_explicit_nulls() {
        let mut b = PivotBuilder::new(&["GEO", "Statistics"]);
        b.push(key(&["Ontario", "Job vacancies"]), "2020-01", Some(10.0));
        b.push(key(&["Quebec", "Job vacancies"]), "2020-02", Some(7.0));
        let t = b.finish();

        assert_eq!(t.periods(), ["2020-01", "2020-02"]);
        assert_eq!(t.cell(&["Ontario", "Job vacancies"], "2020-01"), Some(Some(10.0)));
        assert_eq!(t.cell(&["Ontario", "Job vacancies"], "2020-02"), Some(None));
        assert_eq!(t.cell(&["Quebec", "Job vacancies"], "2020-01"), Some(None));
        assert_eq!(t.cell(&["Alberta", "Job vacancies"], "2020-01"), None);
    }

    #[test]
    fn duplicates_average_and_nulls_are_skipped() {
        let mut b = PivotBuilder::new(&["GEO"]);
        b.push(key(&["Canada"]), "2021-01", Some(2.0));
        b.push(key(&["Canada"]), "2021-01", Some(4.0));
        b.push(key(&["Canada"]), "2021-01", None);
        b.push(key(&["Canada"]), "2021-02", None);
        let t = b.finish();

        assert_eq!(t.cell(&["Canada"], "2021-01"), Some(Some(3.0)));
        assert_eq!(t.periods(), ["2021-01"]);
    }

    #[test]
    fn all_null_rows_and_periods_are_dropped() {
        let mut b = PivotBuilder::new(&["GEO"]);
        b.push(key(&["Ontario"]), "2016-01", Some(10.0));
        b.push(key(&["Ontario"]), "2016-02", None);
        b.push(key(&["Yukon"]), "2016-01", None);
        let t = b.finish();

        assert_eq!(t.periods(), ["2016-01"]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.cell(&["Ontario"], "2016-01"), Some(Some(10.0)));
        assert_eq!(t.cell(&["Yukon"], "2016-01"), None);
    }

    #[test]
    fn all_null_input_gives_empty_pivot() {
        let mut b = PivotBuilder::new(&["GEO"]);
        b.push(key(&["Yukon"]), "2016-01", None);
        let t = b.finish();
        assert!(t.is_empty());
        assert!(t.periods().is_empty());
    }

    #[test]
    fn record_batch_has_index_then_period_columns() -> Result<()> {
        let mut b = PivotBuilder::new(&["GEO"]);
        b.push(key(&["Yukon"]), "2019-05", Some(1.5));
        b.push(key(&["Alberta"]), "2019-04", Some(2.0));
        let batch = b.finish().to_record_batch()?;

        let names: Vec<_> = batch.schema().fields().iter().map(|f| f.name().clone()).collect();
        assert_eq!(names, ["GEO", "2019-04", "2019-05"]);
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.column(1).null_count(), 1);
        assert_eq!(batch.column(2).null_count(), 1);
        Ok(())
    }
}
