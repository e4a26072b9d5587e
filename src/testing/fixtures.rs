//! Pre-built sources shaped like the StatCan extracts.
//!
//! The real tables carry more columns than the transforms read (`DGUID`, `UOM`,
//! `STATUS`, ...); the samples keep a few of them so projection is exercised.

use crate::config::EtlConfig;
use crate::dataset::{EMPLOYEE_TYPE, GEO, NAICS, REF_DATE, STATISTICS, VALUE};
use crate::io::store::ObjectStore;
use crate::testing::builders::CsvBuilder;
use anyhow::Result;

/// Regions shipped as separate quarterly files.
pub const QUARTERLY_REGIONS: [&str; 3] = ["Canada", "Ontario", "Quebec"];

/// Industry sample: 8 rows, 4 of which survive the employee-type and date filters.
#[must_use]
pub fn sample_naics() -> CsvBuilder {
    CsvBuilder::new(&[REF_DATE, GEO, NAICS, EMPLOYEE_TYPE, "UOM", VALUE, "STATUS"])
        .row(&["2014-12", "Ontario", "Construction [23]", "All employees", "No.", "100", ""])
        .row(&["2015-01", "Ontario", "Construction [23]", "All employees", "No.", "410512", ""])
        .row(&["2015-02", "Ontario", "Construction [23]", "All employees", "No.", "409870", ""])
        .row(&["2015-01", "Ontario", "Construction [23]", "Salaried employees", "No.", "1", ""])
        .row(&["2015-01", "Quebec", "Construction [23]", "All employees", "No.", "", ".."])
        .row(&["2016-06", "Quebec", "Retail trade [44-45]", "All employees", "No.", "450120", ""])
        .row(&["2016-06", "Quebec", "Retail trade [44-45]", "all employees", "No.", "1", ""])
        .row(&["2013-05", "Quebec", "Retail trade [44-45]", "All employees", "No.", "2", ""])
}

/// Monthly vacancy sample: 5 rows over two geographies and two statistics.
#[must_use]
pub fn sample_monthly() -> CsvBuilder {
    CsvBuilder::new(&[REF_DATE, GEO, "DGUID", STATISTICS, "UOM", VALUE])
        .row(&["2015-12", "Ontario", "2016A000235", "Job vacancies", "Number", "110420"])
        .row(&["2016-01", "Ontario", "2016A000235", "Job vacancies", "Number", "98765"])
        .row(&["2016-03", "Ontario", "2016A000235", "Job vacancies", "Number", "abc"])
        .row(&["2016-01", "Ontario", "2016A000235", "Job vacancy rate", "Percent", "2.1"])
        .row(&["2016-01", " Alberta ", "2016A000248", "Job vacancies", "Number", "40210"])
}

/// Quarterly vacancy sample for one region: 4 rows.
#[must_use]
pub fn sample_quarterly(region: &str) -> CsvBuilder {
    CsvBuilder::new(&[REF_DATE, GEO, NAICS, STATISTICS, "UOM", VALUE])
        .row(&["2019-01", region, "Total, all industries", "Job vacancies", "Number", "500"])
        .row(&["2019-04", region, "Total, all industries", "Job vacancies", "Number", "520"])
        .row(&["2020-01", region, "Construction [23]", "Job vacancies", "Number", "40"])
        .row(&["2020-01", region, "Construction [23]", "Average offered hourly wage", "$", "F"])
}

/// Write the samples to the locations in `config`.
///
/// Quarterly inputs are written as one file per [`QUARTERLY_REGIONS`] entry in the
/// directory of the configured glob.
///
/// # Errors
/// Returns an error if encoding or storing a sample fails.
pub fn seed_sources<S: ObjectStore + ?Sized>(store: &S, config: &EtlConfig) -> Result<()> {
    store.put(&config.naics.input, &sample_naics().to_bytes()?)?;
    store.put(&config.monthly.input, &sample_monthly().to_bytes()?)?;
    let dir = config
        .quarterly
        .input
        .rsplit_once('/')
        .map_or("", |(dir, _)| dir);
    for region in QUARTERLY_REGIONS {
        let location = if dir.is_empty() {
            format!("{region}.csv")
        } else {
            format!("{dir}/{region}.csv")
        };
        store.put(&location, &sample_quarterly(region).to_bytes()?)?;
    }
    Ok(())
}

/// Seed the samples at the local-pipeline locations and return that config.
///
/// # Errors
/// See [`seed_sources`].
pub fn seed_sample_sources<S: ObjectStore + ?Sized>(store: &S) -> Result<EtlConfig> {
    let config = EtlConfig::local();
    seed_sources(store, &config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_have_expected_sizes() {
        assert_eq!(sample_naics().len(), 8);
        assert_eq!(sample_monthly().len(), 5);
        assert_eq!(sample_quarterly("Yukon").len(), 4);
    }
}
