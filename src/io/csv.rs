//! CSV decoding into [`RawTable`]s.
//!
//! This module provides:
//! - [`read_csv_table`] to parse a delimited byte buffer with a header row
//! - [`write_csv_table`] to encode header + rows (used by fixtures and tests)
//!
//! # Design notes
//! - Cells stay strings; typing happens in the transforms.
//! - Readers are `flexible`: short rows are padded with empty cells by
//!   [`RawTable::new`] rather than rejected.
//! - A UTF-8 byte-order mark in front of the first header is dropped.

use crate::error::EtlError;
use crate::table::RawTable;
use anyhow::{Context, Result, anyhow};
use csv::{ReaderBuilder, WriterBuilder};

const BOM: char = '\u{feff}';

/// Parse a CSV buffer whose first row is the header.
///
/// `source` names the origin in errors and in [`RawTable::source`].
///
/// # Errors
/// [`EtlError::MalformedInput`] when the header is missing or undecodable, or a
/// record is not valid UTF-8.
pub fn read_csv_table(bytes: &[u8], source: &str) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| EtlError::malformed(source, format!("unreadable header: {e}")))?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches(BOM).to_string()
            } else {
                h.to_string()
            }
        })
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(EtlError::malformed(source, "missing header row").into());
    }

    let mut rows = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec.map_err(|e| {
            EtlError::malformed(source, format!("CSV record #{}: {e}", i + 1))
        })?;
        rows.push(rec.iter().map(ToString::to_string).collect());
    }
    Ok(RawTable::new(source, headers, rows))
}

/// Encode a header and rows as CSV bytes.
///
/// # Errors
/// Returns an error if a row cannot be serialized.
pub fn write_csv_table<H, R, C>(headers: &[H], rows: R) -> Result<Vec<u8>>
where
    H: AsRef<str>,
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: AsRef<str>,
{
    let mut wtr = WriterBuilder::new().from_writer(Vec::new());
    let header: Vec<&str> = headers.iter().map(|h| h.as_ref()).collect();
    wtr.write_record(&header).context("write CSV header")?;
    for (i, row) in rows.into_iter().enumerate() {
        let cells: Vec<String> = row.into_iter().map(|c| c.as_ref().to_string()).collect();
        wtr.write_record(&cells)
            .with_context(|| format!("serialize CSV row #{}", i + 1))?;
    }
    wtr.into_inner()
        .map_err(|e| anyhow!("flush CSV buffer: {}", e.error()))
}
