//! Tests for the testing helpers themselves.

use anyhow::Result;
use labour_etl::dataset::{GEO, REF_DATE};
use labour_etl::io::csv::read_csv_table;
use labour_etl::testing::*;
use labour_etl::*;

#[test]
fn builder_output_parses_back() -> Result<()> {
    let csv = CsvBuilder::quarterly()
        .row(&["2020-01", "Yukon", "Construction [23]", "Job vacancies", "5"])
        .repeated(&["2020-04", "Yukon", "Construction [23]", "Job vacancies", "6"], 3);
    assert_eq!(csv.len(), 4);

    let table = read_csv_table(&csv.to_bytes()?, "built.csv")?;
    assert_eq!(table.len(), 4);
    assert_eq!(table.headers()[0], REF_DATE);
    assert_eq!(table.rows()[3][table.column(GEO).unwrap()], "Yukon");
    Ok(())
}

#[test]
fn builder_quotes_cells_with_commas() -> Result<()> {
    let csv = CsvBuilder::quarterly().row(&[
        "2019-01",
        "Canada",
        "Total, all industries",
        "Job vacancies",
        "500",
    ]);
    let table = read_csv_table(&csv.to_bytes()?, "built.csv")?;
    assert_eq!(table.rows()[0][2], "Total, all industries");
    Ok(())
}

#[test]
fn seeded_sources_are_extractable() -> Result<()> {
    let store = MemoryStore::new();
    let config = seed_sample_sources(&store)?;

    assert_eq!(
        store.list(&config.quarterly.input)?.len(),
        QUARTERLY_REGIONS.len()
    );
    for dataset in Dataset::ALL {
        let table = Extractor::new(&store).extract(dataset, &config.paths(dataset).input)?;
        assert!(!table.is_empty(), "{dataset}");
    }
    Ok(())
}

#[test]
#[should_panic(expected = "Pivot cell mismatch")]
fn assert_pivot_cell_reports_mismatch() {
    let mut b = PivotBuilder::new(&["GEO"]);
    b.push(vec!["Ontario".into()], "2020-01", Some(1.0));
    assert_pivot_cell(&b.finish(), &["Ontario"], "2020-01", Some(2.0));
}

#[test]
#[should_panic(expected = "Pivot has no cell")]
fn assert_pivot_cell_reports_missing_key() {
    let b = PivotBuilder::new(&["GEO"]);
    assert_pivot_cell(&b.finish(), &["Ontario"], "2020-01", None);
}

#[test]
#[should_panic(expected = "Partition layout mismatch")]
fn assert_partition_layout_requires_marker() {
    let keys = vec!["Year=2020/GEO=Ontario/part-00000.snappy.parquet".to_string()];
    assert_partition_layout(&keys, &["Year=2020/GEO=Ontario"]);
}

#[test]
#[should_panic(expected = "Expected a WriteFailure error")]
fn assert_error_kind_rejects_ok() {
    let ok: Result<u8> = Ok(1);
    assert_error_kind(&ok, ErrorKind::WriteFailure);
}

#[test]
fn job_commit_is_tracked() {
    let mut job = Job::init("unit");
    assert_eq!(job.name(), "unit");
    assert!(!job.is_committed());
    job.commit();
    assert!(job.is_committed());
}
