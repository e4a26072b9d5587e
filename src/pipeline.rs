//! End-to-end runs: extract, transform and load each dataset.
//!
//! - [`run_local`] pivots each dataset into a single Parquet file. Datasets are
//!   independent: a failure in one is reported and the others still run.
//! - [`run_distributed`] writes each dataset as a `(Year, GEO)`-partitioned tree
//!   and stops at the first failure, leaving the [`Job`] uncommitted.

use crate::config::{DatasetPaths, EtlConfig};
use crate::dataset::Dataset;
use crate::extract::Extractor;
use crate::io::store::ObjectStore;
use crate::job::Job;
use crate::load::Loader;
use crate::runner::BatchExecutor;
use crate::transform::{
    Monthly, Naics, Quarterly, Transformer, transform_distributed, transform_local,
};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// What one dataset run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetReport {
    pub dataset: Dataset,
    /// Rows read from the source(s).
    pub rows_read: usize,
    /// Rows written: pivot rows locally, records when partitioned.
    pub rows_written: usize,
    pub output: String,
}

/// Outcome of a local run, one entry per dataset in [`Dataset::ALL`] order.
#[derive(Debug)]
pub struct LocalRun {
    pub results: Vec<(Dataset, Result<DatasetReport>)>,
}

impl LocalRun {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|(_, r)| r.is_ok())
    }

    #[must_use]
    pub fn failed(&self) -> Vec<Dataset> {
        self.results
            .iter()
            .filter(|(_, r)| r.is_err())
            .map(|(d, _)| *d)
            .collect()
    }

    /// Fold into a single result naming every failed dataset.
    ///
    /// # Errors
    /// Returns an error if any dataset failed.
    pub fn into_result(self) -> Result<Vec<DatasetReport>> {
        let mut reports = Vec::with_capacity(self.results.len());
        let mut failures = Vec::new();
        for (dataset, result) in self.results {
            match result {
                Ok(r) => reports.push(r),
                Err(e) => failures.push(format!("{dataset}: {e:#}")),
            }
        }
        if failures.is_empty() {
            Ok(reports)
        } else {
            anyhow::bail!("{} dataset(s) failed: {}", failures.len(), failures.join("; "))
        }
    }
}

fn local_dataset<X: Transformer, S: ObjectStore + ?Sized>(
    store: &S,
    paths: &DatasetPaths,
) -> Result<DatasetReport> {
    let table = Extractor::new(store).extract(X::DATASET, &paths.input)?;
    let pivot = transform_local::<X>(&table)?;
    let rows_written = Loader::new(store)
        .write_pivot(&pivot, &paths.output)
        .with_context(|| format!("load {} pivot", X::DATASET))?;
    Ok(DatasetReport {
        dataset: X::DATASET,
        rows_read: table.len(),
        rows_written,
        output: paths.output.clone(),
    })
}

/// Run the local pivot pipeline for one dataset.
///
/// # Errors
/// Extraction, schema and write failures for that dataset.
pub fn run_local_dataset<S: ObjectStore + ?Sized>(
    store: &S,
    config: &EtlConfig,
    dataset: Dataset,
) -> Result<DatasetReport> {
    let paths = config.paths(dataset);
    match dataset {
        Dataset::Naics => local_dataset::<Naics, S>(store, paths),
        Dataset::Monthly => local_dataset::<Monthly, S>(store, paths),
        Dataset::Quarterly => local_dataset::<Quarterly, S>(store, paths),
    }
}

/// Run the local pivot pipeline for all datasets, in order.
pub fn run_local<S: ObjectStore + ?Sized>(store: &S, config: &EtlConfig) -> LocalRun {
    let results = Dataset::ALL
        .iter()
        .map(|&dataset| {
            let result = run_local_dataset(store, config, dataset);
            match &result {
                Ok(r) => info!(
                    dataset = %dataset,
                    rows = r.rows_written,
                    output = %r.output,
                    "pivot written"
                ),
                Err(e) => warn!(dataset = %dataset, error = %format!("{e:#}"), "dataset failed"),
            }
            (dataset, result)
        })
        .collect();
    LocalRun { results }
}

fn distributed_dataset<X, S, E>(store: &S, exec: &E, paths: &DatasetPaths) -> Result<DatasetReport>
where
    X: Transformer,
    S: ObjectStore + ?Sized,
    E: BatchExecutor,
{
    let table = Extractor::new(store).extract(X::DATASET, &paths.input)?;
    let rows_read = table.len();
    let partitioned = transform_distributed::<X, E>(table, exec)?;

    info!("Starting {} write", X::DATASET);
    let rows_written = Loader::new(store)
        .write_partitioned(&partitioned, &paths.output)
        .with_context(|| format!("load {} partitions", X::DATASET))?;
    info!("{} write completed", X::DATASET);

    Ok(DatasetReport {
        dataset: X::DATASET,
        rows_read,
        rows_written,
        output: paths.output.clone(),
    })
}

/// Run the partitioned pipeline for one dataset.
///
/// # Errors
/// Extraction, schema, executor and write failures for that dataset.
pub fn run_distributed_dataset<S, E>(
    store: &S,
    exec: &E,
    config: &EtlConfig,
    dataset: Dataset,
) -> Result<DatasetReport>
where
    S: ObjectStore + ?Sized,
    E: BatchExecutor,
{
    let paths = config.paths(dataset);
    match dataset {
        Dataset::Naics => distributed_dataset::<Naics, S, E>(store, exec, paths),
        Dataset::Monthly => distributed_dataset::<Monthly, S, E>(store, exec, paths),
        Dataset::Quarterly => distributed_dataset::<Quarterly, S, E>(store, exec, paths),
    }
}

/// Run the partitioned pipeline for all datasets and commit `job` on success.
///
/// # Errors
/// The first dataset failure; `job` is then left uncommitted.
pub fn run_distributed<S, E>(
    store: &S,
    exec: &E,
    config: &EtlConfig,
    job: &mut Job,
) -> Result<Vec<DatasetReport>>
where
    S: ObjectStore + ?Sized,
    E: BatchExecutor,
{
    let mut reports = Vec::with_capacity(Dataset::ALL.len());
    for dataset in Dataset::ALL {
        let report = run_distributed_dataset(store, exec, config, dataset)
            .with_context(|| format!("job {}: {dataset} pipeline failed", job.name()))?;
        reports.push(report);
    }
    job.commit();
    Ok(reports)
}
