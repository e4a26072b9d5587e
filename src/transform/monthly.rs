//! Monthly job vacancies. The full history is kept; nothing is filtered.

use crate::dataset::{Dataset, GEO, REF_DATE, STATISTICS, VALUE};
use crate::error::EtlError;
use crate::partition::{PartitionKey, PartitionedRecord};
use crate::table::RawTable;
use crate::transform::Transformer;
use crate::values::{coerce_value, derive_year, trim_cell};
use serde::{Deserialize, Serialize};

pub struct Monthly;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "GEO")]
    pub geo: String,
    #[serde(rename = "Statistics")]
    pub statistics: String,
    #[serde(rename = "VALUE")]
    pub value: Option<f64>,
    #[serde(rename = "Year")]
    pub year: Option<i32>,
}

impl PartitionedRecord for MonthlyRecord {
    fn partition_key(&self) -> PartitionKey {
        PartitionKey::new(self.year, self.geo.clone())
    }
}

pub struct MonthlyColumns {
    ref_date: usize,
    geo: usize,
    statistics: usize,
    value: usize,
}

impl Transformer for Monthly {
    type Record = MonthlyRecord;
    type Columns = MonthlyColumns;

    const DATASET: Dataset = Dataset::Monthly;
    const PIVOT_INDEX: &'static [&'static str] = &[GEO, STATISTICS];

    fn resolve(table: &RawTable) -> Result<MonthlyColumns, EtlError> {
        let c = table.require_columns(&[REF_DATE, GEO, STATISTICS, VALUE])?;
        Ok(MonthlyColumns {
            ref_date: c[0],
            geo: c[1],
            statistics: c[2],
            value: c[3],
        })
    }

    fn record(cols: &MonthlyColumns, row: &[String]) -> Option<MonthlyRecord> {
        let date = trim_cell(&row[cols.ref_date]);
        Some(MonthlyRecord {
            year: derive_year(&date),
            date,
            geo: trim_cell(&row[cols.geo]),
            statistics: trim_cell(&row[cols.statistics]),
            value: coerce_value(&row[cols.value]),
        })
    }
}
