use anyhow::Result;
use labour_etl::dataset::{GEO, NAICS, REF_DATE, STATISTICS, VALUE};
use labour_etl::io::csv::read_csv_table;
use labour_etl::testing::*;
use labour_etl::*;

#[test]
fn extract_single_file_keeps_every_row_and_column() -> Result<()> {
    let store = MemoryStore::new();
    store.put("in/naics.csv", &sample_naics().to_bytes()?)?;

    let table = Extractor::new(&store).extract(Dataset::Naics, "in/naics.csv")?;
    assert_eq!(table.len(), 8);
    assert_eq!(table.headers().len(), 7);
    assert!(table.column("UOM").is_some());
    assert_eq!(table.source(), "in/naics.csv");
    Ok(())
}

#[test]
fn extract_missing_file_is_source_unavailable() {
    let store = MemoryStore::new();
    let res = Extractor::new(&store).extract(Dataset::Monthly, "in/nope.csv");
    assert_error_kind(&res, ErrorKind::SourceUnavailable);
}

#[test]
fn extract_glob_without_matches_is_source_unavailable() -> Result<()> {
    let store = MemoryStore::new();
    store.put("in/other/Canada.csv", &sample_quarterly("Canada").to_bytes()?)?;

    let res = Extractor::new(&store).extract(Dataset::Quarterly, "in/quarterly/*.csv");
    assert_error_kind(&res, ErrorKind::SourceUnavailable);
    Ok(())
}

#[test]
fn extract_missing_required_column_is_malformed() -> Result<()> {
    let store = MemoryStore::new();
    let csv = CsvBuilder::new(&[REF_DATE, GEO, VALUE])
        .row(&["2016-01", "Ontario", "1"])
        .to_bytes()?;
    store.put("in/monthly.csv", &csv)?;

    let res = Extractor::new(&store).extract(Dataset::Monthly, "in/monthly.csv");
    assert_error_kind(&res, ErrorKind::MalformedInput);
    let msg = format!("{:#}", res.unwrap_err());
    assert!(msg.contains(STATISTICS), "{msg}");
    Ok(())
}

#[test]
fn extract_empty_file_is_malformed() -> Result<()> {
    let store = MemoryStore::new();
    store.put("in/monthly.csv", b"")?;

    let res = Extractor::new(&store).extract(Dataset::Monthly, "in/monthly.csv");
    assert_error_kind(&res, ErrorKind::MalformedInput);
    Ok(())
}

#[test]
fn extract_header_only_file_is_empty_table() -> Result<()> {
    let store = MemoryStore::new();
    store.put("in/monthly.csv", &CsvBuilder::monthly().to_bytes()?)?;

    let table = Extractor::new(&store).extract(Dataset::Monthly, "in/monthly.csv")?;
    assert!(table.is_empty());
    Ok(())
}

#[test]
fn extract_quarterly_stacks_every_region_file() -> Result<()> {
    let store = MemoryStore::new();
    for region in QUARTERLY_REGIONS {
        store.put(
            &format!("in/quarterly/{region}.csv"),
            &sample_quarterly(region).to_bytes()?,
        )?;
    }

    let table = Extractor::new(&store).extract(Dataset::Quarterly, "in/quarterly/*.csv")?;
    assert_eq!(table.len(), QUARTERLY_REGIONS.len() * sample_quarterly("x").len());

    // Files are read in sorted order.
    let geo = table.column(GEO).unwrap();
    let first: Vec<&str> = table.rows().iter().map(|r| r[geo].as_str()).collect();
    assert_eq!(&first[..4], ["Canada"; 4]);
    assert_eq!(&first[8..], ["Quebec"; 4]);
    Ok(())
}

#[test]
fn extract_quarterly_keeps_duplicate_rows() -> Result<()> {
    let store = MemoryStore::new();
    let csv = sample_quarterly("Canada").to_bytes()?;
    store.put("in/quarterly/a.csv", &csv)?;
    store.put("in/quarterly/b.csv", &csv)?;

    let table = Extractor::new(&store).extract(Dataset::Quarterly, "in/quarterly/*.csv")?;
    assert_eq!(table.len(), 8);
    assert_eq!(table.rows()[0], table.rows()[4]);
    Ok(())
}

#[test]
fn extract_quarterly_aligns_columns_by_name() -> Result<()> {
    let store = MemoryStore::new();
    let a = CsvBuilder::quarterly()
        .row(&["2020-01", "Ontario", "Construction [23]", "Job vacancies", "40"])
        .to_bytes()?;
    let b = CsvBuilder::new(&[GEO, REF_DATE, "UOM", STATISTICS, NAICS, VALUE])
        .row(&["Quebec", "2020-04", "Number", "Job vacancies", "Construction [23]", "35"])
        .to_bytes()?;
    store.put("in/quarterly/a.csv", &a)?;
    store.put("in/quarterly/b.csv", &b)?;

    let table = Extractor::new(&store).extract(Dataset::Quarterly, "in/quarterly/*.csv")?;
    assert_eq!(table.headers(), [REF_DATE, GEO, NAICS, STATISTICS, VALUE, "UOM"]);
    assert_eq!(
        table.rows(),
        [
            vec!["2020-01", "Ontario", "Construction [23]", "Job vacancies", "40", ""],
            vec!["2020-04", "Quebec", "Construction [23]", "Job vacancies", "35", "Number"],
        ]
    );
    Ok(())
}

#[test]
fn extract_quarterly_rejects_a_file_missing_columns() -> Result<()> {
    let store = MemoryStore::new();
    store.put("in/quarterly/a.csv", &sample_quarterly("Canada").to_bytes()?)?;
    store.put("in/quarterly/b.csv", &CsvBuilder::monthly().to_bytes()?)?;

    let res = Extractor::new(&store).extract(Dataset::Quarterly, "in/quarterly/*.csv");
    assert_error_kind(&res, ErrorKind::MalformedInput);
    Ok(())
}

#[test]
fn csv_reader_strips_byte_order_mark() -> Result<()> {
    let mut bytes = "\u{feff}".as_bytes().to_vec();
    let csv = CsvBuilder::monthly().row(&["2016-01", "Ontario", "Job vacancies", "1"]);
    bytes.extend(csv.to_bytes()?);

    let table = read_csv_table(&bytes, "bom.csv")?;
    assert_eq!(table.headers()[0], REF_DATE);
    assert!(table.require_columns(Dataset::Monthly.required_columns()).is_ok());
    Ok(())
}

#[test]
fn csv_reader_pads_short_rows() -> Result<()> {
    let bytes = b"REF_DATE,GEO,Statistics,VALUE\n2016-01,Ontario\n";
    let table = read_csv_table(bytes, "short.csv")?;
    assert_eq!(table.rows(), [vec!["2016-01", "Ontario", "", ""]]);
    Ok(())
}
