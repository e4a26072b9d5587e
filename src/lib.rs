//! # labour-etl
//!
//! Batch **extract → transform → load** for three Statistics Canada labour-market
//! tables: employment by industry (NAICS), monthly job vacancies and quarterly job
//! vacancies by industry. Raw CSV extracts are normalized into analytics-ready
//! Parquet.
//!
//! ## Two pipelines, one transform
//!
//! Each dataset describes its transform once, as a [`Transformer`]. Two pipelines
//! are built on top of it:
//!
//! - **Local** ([`pipeline::run_local`]) filters and projects each table, then
//!   pivots it wide: one row per `(GEO, NAICS[, Statistics])`, one `Float64` column
//!   per `REF_DATE`. Each dataset lands in a single Parquet file.
//! - **Partitioned** ([`pipeline::run_distributed`]) keeps one row per record,
//!   trims strings, coerces `VALUE` to a float, derives `Year`, and writes a Hive
//!   tree partitioned by `Year` then `GEO`. Row-level work is handed to an injected
//!   [`BatchExecutor`]; the shipped [`Runner`] uses rayon.
//!
//! ## Core Concepts
//!
//! ### Tables
//! A [`RawTable`] is a header plus string rows, exactly as extracted. The
//! [`Extractor`] checks each dataset's required columns at the boundary and
//! concatenates multi-file sources (the quarterly table ships one file per region).
//!
//! ### Storage
//! All I/O goes through [`ObjectStore`]. [`LocalStore`] serves filesystem paths
//! and maps `s3://bucket/key` URIs under a root directory;
//! [`MemoryStore`](io::memory::MemoryStore) keeps everything in memory for tests.
//! Writes are full overwrites, staged and swapped in atomically.
//!
//! ### Errors
//! Fallible functions return [`anyhow::Result`]. Failures a caller may branch on
//! are [`EtlError`] values inside the `anyhow` chain: `SourceUnavailable`,
//! `MalformedInput` and `WriteFailure`. An unparseable `VALUE` is never an error;
//! it becomes null.
//!
//! ## Quick Start
//!
//! ```no_run
//! use labour_etl::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = LocalStore::default();
//! let run = pipeline::run_local(&store, &EtlConfig::local());
//! run.into_result()?;
//! # Ok(())
//! # }
//! ```
//!
//! ```no_run
//! use labour_etl::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = LocalStore::new("/mnt/buckets");
//! let mut job = Job::init("labour-etl-nightly");
//! pipeline::run_distributed(&store, &Runner::default(), &EtlConfig::distributed(), &mut job)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod extract;
pub mod io;
pub mod job;
pub mod load;
pub mod logging;
pub mod partition;
pub mod pipeline;
pub mod pivot;
pub mod runner;
pub mod table;
pub mod testing;
pub mod transform;
pub mod values;

pub use config::{DatasetPaths, EtlConfig};
pub use dataset::Dataset;
pub use error::{ErrorKind, EtlError};
pub use extract::Extractor;
pub use io::store::{LocalStore, ObjectStore};
pub use job::Job;
pub use load::Loader;
pub use partition::{PartitionKey, PartitionedRecord, PartitionedRows};
pub use pivot::{PivotBuilder, PivotTable};
pub use runner::{BatchExecutor, ExecMode, Runner};
pub use table::RawTable;
pub use transform::{Transformer, transform_distributed, transform_local};
