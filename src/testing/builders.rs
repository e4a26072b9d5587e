//! Fluent builder for CSV sources.

use crate::dataset::{EMPLOYEE_TYPE, GEO, NAICS, REF_DATE, STATISTICS, VALUE};
use crate::io::csv::write_csv_table;
use anyhow::Result;

/// Builds a CSV source row by row.
///
/// # Example
///
/// ```
/// use labour_etl::testing::CsvBuilder;
///
/// let csv = CsvBuilder::monthly()
///     .row(&["2016-03", "Ontario", "Job vacancies", "abc"])
///     .to_bytes()
///     .unwrap();
/// assert!(String::from_utf8(csv).unwrap().starts_with("REF_DATE,GEO"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CsvBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvBuilder {
    /// Start from an arbitrary header.
    #[must_use]
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    /// `REF_DATE, GEO, NAICS, Type of employee, VALUE`
    #[must_use]
    pub fn naics() -> Self {
        Self::new(&[REF_DATE, GEO, NAICS, EMPLOYEE_TYPE, VALUE])
    }

    /// `REF_DATE, GEO, Statistics, VALUE`
    #[must_use]
    pub fn monthly() -> Self {
        Self::new(&[REF_DATE, GEO, STATISTICS, VALUE])
    }

    /// `REF_DATE, GEO, NAICS, Statistics, VALUE`
    #[must_use]
    pub fn quarterly() -> Self {
        Self::new(&[REF_DATE, GEO, NAICS, STATISTICS, VALUE])
    }

    /// Append one row; cells are matched to the header by position.
    #[must_use]
    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(ToString::to_string).collect());
        self
    }

    /// Append the same row `count` times.
    #[must_use]
    pub fn repeated(mut self, cells: &[&str], count: usize) -> Self {
        for _ in 0..count {
            self = self.row(cells);
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Encode as CSV bytes.
    ///
    /// # Errors
    /// Returns an error if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        write_csv_table(&self.headers, &self.rows)
    }
}
