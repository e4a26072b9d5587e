//! Testing utilities for the ETL pipelines.
//!
//! - **Builders**: [`CsvBuilder`] assembles StatCan-shaped CSV sources fluently
//! - **Fixtures**: small sample sources for each dataset and a ready-made
//!   [`EtlConfig`](crate::config::EtlConfig) pointing at them
//! - **Fakes**: [`MemoryStore`] re-exported from [`crate::io::memory`]
//! - **Assertions**: pivot cells, partition layouts and error kinds with readable
//!   failure messages
//!
//! # Quick Start
//!
//! ```
//! use labour_etl::testing::*;
//! use labour_etl::pipeline::run_local;
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = MemoryStore::new();
//! let config = seed_sample_sources(&store)?;
//!
//! let run = run_local(&store, &config);
//! assert!(run.is_success());
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use crate::io::memory::MemoryStore;
pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
