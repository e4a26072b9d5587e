//! Parquet encoding for the loader.
//!
//! This module provides:
//! - [`records_to_batch`] to turn `&[T]` into a `RecordBatch` with a schema inferred
//!   from `T` by `serde_arrow` (works for zero rows too)
//! - [`drop_columns`] to strip partition columns before a batch is written
//! - [`encode_batch`] to serialize one batch into an in-memory Parquet file
//! - [`decode_batches`] / [`decode_records`] to read such a buffer back
//!
//! Output is Snappy-compressed. The writer embeds no timestamps, so encoding the
//! same batch twice produces identical bytes.

use anyhow::{Context, Result};
use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_arrow::schema::{SchemaLike, TracingOptions};
use serde_arrow::{from_record_batch, to_record_batch};

fn writer_properties() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Convert typed rows into a `RecordBatch`.
///
/// The Arrow schema is traced from `T` itself, so an empty slice still yields a
/// batch with the right columns. `Option` fields become nullable columns.
///
/// # Errors
/// Returns an error if schema tracing or conversion fails.
pub fn records_to_batch<T: Serialize + serde::Deserialize<'static>>(
    data: &[T],
) -> Result<RecordBatch> {
    let fields: Vec<FieldRef> = Vec::<FieldRef>::from_type::<T>(TracingOptions::default())
        .context("infer Arrow schema from record type")?;
    to_record_batch(&fields, &data).context("convert rows to RecordBatch")
}

/// Remove the named columns from `batch`; unknown names are ignored.
///
/// # Errors
/// Returns an error if the projection fails.
pub fn drop_columns(batch: &RecordBatch, names: &[&str]) -> Result<RecordBatch> {
    let schema = batch.schema();
    let keep: Vec<usize> = schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| !names.contains(&f.name().as_str()))
        .map(|(i, _)| i)
        .collect();
    batch.project(&keep).context("project RecordBatch")
}

/// Serialize one batch as a complete Parquet file.
///
/// # Errors
/// Returns an error if the writer cannot be created, written, or closed.
pub fn encode_batch(batch: &RecordBatch) -> Result<Vec<u8>> {
    let mut writer = ArrowWriter::try_new(Vec::new(), batch.schema(), Some(writer_properties()))
        .context("create ArrowWriter")?;
    writer.write(batch).context("write batch to parquet")?;
    writer.into_inner().context("close ArrowWriter")
}

/// Read every batch from a Parquet buffer.
///
/// # Errors
/// Returns an error if the buffer is not valid Parquet.
pub fn decode_batches(bytes: Vec<u8>) -> Result<Vec<RecordBatch>> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(bytes))
        .context("open ParquetRecordBatchReader")?
        .with_batch_size(64 * 1024)
        .build()
        .context("build ParquetRecordBatchReader")?;
    reader
        .collect::<Result<Vec<_>, _>>()
        .context("read parquet batches")
}

/// Read a Parquet buffer into typed rows.
///
/// # Errors
/// Returns an error if decoding fails or a row does not fit `T`.
pub fn decode_records<T: DeserializeOwned>(bytes: Vec<u8>) -> Result<Vec<T>> {
    let mut out = Vec::new();
    for batch in decode_batches(bytes)? {
        let mut rows: Vec<T> =
            from_record_batch(&batch).context("deserialize RecordBatch rows")?;
        out.append(&mut rows);
    }
    Ok(out)
}
