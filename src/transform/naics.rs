//! Employment by industry.
//!
//! Only the `All employees` series from January 2015 onward is kept. Both filters
//! are exact: the employee type is compared case-sensitively and the date bound is
//! a lexical comparison on the `YYYY-MM` string.

use crate::dataset::{
    ALL_EMPLOYEES, Dataset, EMPLOYEE_TYPE, GEO, NAICS, NAICS_MIN_REF_DATE, REF_DATE, VALUE,
};
use crate::error::EtlError;
use crate::partition::{PartitionKey, PartitionedRecord};
use crate::table::RawTable;
use crate::transform::Transformer;
use crate::values::{coerce_value, derive_year, ref_date_at_least, trim_cell};
use serde::{Deserialize, Serialize};

/// Marker type for the industry dataset.
pub struct Naics;

/// One row of the partitioned industry output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaicsRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "GEO")]
    pub geo: String,
    #[serde(rename = "NAICS")]
    pub naics: String,
    #[serde(rename = "VALUE")]
    pub value: Option<f64>,
    #[serde(rename = "Year")]
    pub year: Option<i32>,
}

impl PartitionedRecord for NaicsRecord {
    fn partition_key(&self) -> PartitionKey {
        PartitionKey::new(self.year, self.geo.clone())
    }
}

pub struct NaicsColumns {
    ref_date: usize,
    geo: usize,
    naics: usize,
    employee_type: usize,
    value: usize,
}

impl Transformer for Naics {
    type Record = NaicsRecord;
    type Columns = NaicsColumns;

    const DATASET: Dataset = Dataset::Naics;
    const PIVOT_INDEX: &'static [&'static str] = &[GEO, NAICS];

    fn resolve(table: &RawTable) -> Result<NaicsColumns, EtlError> {
        let c = table.require_columns(&[REF_DATE, GEO, NAICS, EMPLOYEE_TYPE, VALUE])?;
        Ok(NaicsColumns {
            ref_date: c[0],
            geo: c[1],
            naics: c[2],
            employee_type: c[3],
            value: c[4],
        })
    }

    fn record(cols: &NaicsColumns, row: &[String]) -> Option<NaicsRecord> {
        // The employee type is matched before trimming; the date bound after.
        if row[cols.employee_type] != ALL_EMPLOYEES {
            return None;
        }
        let date = trim_cell(&row[cols.ref_date]);
        if !ref_date_at_least(&date, NAICS_MIN_REF_DATE) {
            return None;
        }
        Some(NaicsRecord {
            year: derive_year(&date),
            date,
            geo: trim_cell(&row[cols.geo]),
            naics: trim_cell(&row[cols.naics]),
            value: coerce_value(&row[cols.value]),
        })
    }

    fn filter_local(table: &RawTable) -> Result<RawTable, EtlError> {
        let c = table.require_columns(&[EMPLOYEE_TYPE, REF_DATE])?;
        let (employee_type, ref_date) = (c[0], c[1]);
        Ok(table.filter(|row| {
            row[employee_type] == ALL_EMPLOYEES
                && ref_date_at_least(&row[ref_date], NAICS_MIN_REF_DATE)
        }))
    }
}
