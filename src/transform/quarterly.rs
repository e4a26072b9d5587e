//! Quarterly job vacancies by industry.
//!
//! The source is one file per province or territory (plus a Canada total); the
//! extractor has already stacked them, duplicates included.

use crate::dataset::{Dataset, GEO, NAICS, REF_DATE, STATISTICS, VALUE};
use crate::error::EtlError;
use crate::partition::{PartitionKey, PartitionedRecord};
use crate::table::RawTable;
use crate::transform::Transformer;
use crate::values::{coerce_value, derive_year, trim_cell};
use serde::{Deserialize, Serialize};

pub struct Quarterly;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "GEO")]
    pub geo: String,
    #[serde(rename = "NAICS")]
    pub naics: String,
    #[serde(rename = "Statistics")]
    pub statistics: String,
    #[serde(rename = "VALUE")]
    pub value: Option<f64>,
    #[serde(rename = "Year")]
    pub year: Option<i32>,
}

impl PartitionedRecord for QuarterlyRecord {
    fn partition_key(&self) -> PartitionKey {
        PartitionKey::new(self.year, self.geo.clone())
    }
}

pub struct QuarterlyColumns {
    ref_date: usize,
    geo: usize,
    naics: usize,
    statistics: usize,
    value: usize,
}

impl Transformer for Quarterly {
    type Record = QuarterlyRecord;
    type Columns = QuarterlyColumns;

    const DATASET: Dataset = Dataset::Quarterly;
    const PIVOT_INDEX: &'static [&'static str] = &[GEO, NAICS, STATISTICS];

    fn resolve(table: &RawTable) -> Result<QuarterlyColumns, EtlError> {
        let c = table.require_columns(&[REF_DATE, GEO, NAICS, STATISTICS, VALUE])?;
        Ok(QuarterlyColumns {
            ref_date: c[0],
            geo: c[1],
            naics: c[2],
            statistics: c[3],
            value: c[4],
        })
    }

    fn record(cols: &QuarterlyColumns, row: &[String]) -> Option<QuarterlyRecord> {
        let date = trim_cell(&row[cols.ref_date]);
        Some(QuarterlyRecord {
            year: derive_year(&date),
            date,
            geo: trim_cell(&row[cols.geo]),
            naics: trim_cell(&row[cols.naics]),
            statistics: trim_cell(&row[cols.statistics]),
            value: coerce_value(&row[cols.value]),
        })
    }
}
