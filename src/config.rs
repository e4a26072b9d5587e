//! Input and output locations for the three pipelines.
//!
//! The locations are fixed per deployment; [`EtlConfig::local`] and
//! [`EtlConfig::distributed`] return the two built-in layouts. Tests build their
//! own `EtlConfig` pointing into a temporary directory or a
//! [`MemoryStore`](crate::io::memory::MemoryStore).

use crate::dataset::Dataset;

/// Where one dataset is read from and written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    /// A single file/object, or a glob for [`Dataset::Quarterly`].
    pub input: String,
    /// A Parquet file (local pivot) or a prefix (partitioned output).
    pub output: String,
}

impl DatasetPaths {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtlConfig {
    pub naics: DatasetPaths,
    pub monthly: DatasetPaths,
    pub quarterly: DatasetPaths,
}

const RAW_BUCKET: &str = "s3://raw-files-canada-employment";

impl EtlConfig {
    /// Relative paths used by the single-machine pipeline.
    #[must_use]
    pub fn local() -> Self {
        Self {
            naics: DatasetPaths::new(
                "data/Canada NAICS/NAICS Canada Data.csv",
                "data/Cleaned Pivots/processed_NAICS.parquet",
            ),
            monthly: DatasetPaths::new(
                "data/Monthly Vac.csv",
                "data/Cleaned Pivots/processed_Monthly Vac.parquet",
            ),
            quarterly: DatasetPaths::new(
                "data/Canada Quarterly/*.csv",
                "data/Cleaned Pivots/processed_Quarterly Vac.parquet",
            ),
        }
    }

    /// Object-storage locations used by the partitioned job.
    #[must_use]
    pub fn distributed() -> Self {
        Self {
            naics: DatasetPaths::new(
                format!("{RAW_BUCKET}/NAICS Canada Data.csv"),
                format!("{RAW_BUCKET}/etl-finished-files/NAICS/"),
            ),
            monthly: DatasetPaths::new(
                format!("{RAW_BUCKET}/Monthly Vac.csv"),
                format!("{RAW_BUCKET}/etl-finished-files/MONTHLY/"),
            ),
            quarterly: DatasetPaths::new(
                format!("{RAW_BUCKET}/Canada Quarterly/*.csv"),
                format!("{RAW_BUCKET}/etl-finished-files/QUARTERLY/"),
            ),
        }
    }

    #[must_use]
    pub const fn paths(&self, dataset: Dataset) -> &DatasetPaths {
        match dataset {
            Dataset::Naics => &self.naics,
            Dataset::Monthly => &self.monthly,
            Dataset::Quarterly => &self.quarterly,
        }
    }
}
