//! Batch executor for the partitioned pipelines.
//!
//! The distributed transforms never touch threads or partitions themselves. They
//! hand a [`BatchExecutor`] the input rows, a per-row transform (which may drop a
//! row by returning `None`), and a partition-key extractor; the executor returns
//! the surviving records grouped by key.
//!
//! [`Runner`] is the in-process executor: sequential, or parallel over contiguous
//! row chunks on a rayon pool. Both modes return the same grouping, with records
//! in input order inside each partition.

use crate::partition::{PartitionKey, PartitionedRows};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Runs a row transform and groups its output by a derived key.
pub trait BatchExecutor {
    /// Apply `transform` to every row and group the survivors by `key`.
    ///
    /// # Errors
    /// Returns an error if the executor cannot schedule the work.
    fn run<T, U, F, G>(&self, input: Vec<T>, transform: F, key: G) -> Result<PartitionedRows<U>>
    where
        T: Send + Sync,
        U: Send,
        F: Fn(&T) -> Option<U> + Send + Sync,
        G: Fn(&U) -> PartitionKey + Send + Sync;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    Sequential,
    Parallel {
        threads: Option<usize>,
        partitions: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug)]
pub struct Runner {
    pub mode: ExecMode,
    pub default_partitions: usize,
}

impl Default for Runner {
    fn default() -> Self {
        let mode = if cfg!(feature = "parallel-exec") {
            ExecMode::Parallel {
                threads: None,
                partitions: None,
            }
        } else {
            ExecMode::Sequential
        };
        Self {
            mode,
            default_partitions: 2 * num_cpus::get().max(2),
        }
    }
}

impl Runner {
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            mode: ExecMode::Sequential,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn parallel(threads: Option<usize>, partitions: Option<usize>) -> Self {
        Self {
            mode: ExecMode::Parallel {
                threads,
                partitions,
            },
            ..Self::default()
        }
    }
}

impl BatchExecutor for Runner {
    fn run<T, U, F, G>(&self, input: Vec<T>, transform: F, key: G) -> Result<PartitionedRows<U>>
    where
        T: Send + Sync,
        U: Send,
        F: Fn(&T) -> Option<U> + Send + Sync,
        G: Fn(&U) -> PartitionKey + Send + Sync,
    {
        match self.mode {
            ExecMode::Sequential => Ok(group_chunk(&input, &transform, &key)),
            ExecMode::Parallel {
                threads,
                partitions,
            } => {
                let parts = partitions.unwrap_or(self.default_partitions).max(1);
                let exec = || exec_parallel(&input, parts, &transform, &key);
                match threads {
                    Some(t) => {
                        let pool = rayon::ThreadPoolBuilder::new()
                            .num_threads(t)
                            .build()
                            .context("build rayon thread pool")?;
                        Ok(pool.install(exec))
                    }
                    None => Ok(exec()),
                }
            }
        }
    }
}

/// Transform and group one contiguous chunk.
fn group_chunk<T, U, F, G>(chunk: &[T], transform: &F, key: &G) -> PartitionedRows<U>
where
    F: Fn(&T) -> Option<U>,
    G: Fn(&U) -> PartitionKey,
{
    let mut out: PartitionedRows<U> = BTreeMap::new();
    for rec in chunk.iter().filter_map(transform) {
        out.entry(key(&rec)).or_default().push(rec);
    }
    out
}

/// Chunk the input, group each chunk on a worker, then merge in chunk order.
fn exec_parallel<T, U, F, G>(
    input: &[T],
    parts: usize,
    transform: &F,
    key: &G,
) -> PartitionedRows<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Option<U> + Sync,
    G: Fn(&U) -> PartitionKey + Sync,
{
    if input.is_empty() {
        return BTreeMap::new();
    }
    let chunk = input.len().div_ceil(parts.min(input.len()));
    let locals: Vec<PartitionedRows<U>> = input
        .par_chunks(chunk)
        .map(|c| group_chunk(c, transform, key))
        .collect();

    let mut merged: PartitionedRows<U> = BTreeMap::new();
    for local in locals {
        for (k, mut rows) in local {
            merged.entry(k).or_default().append(&mut rows);
        }
    }
    merged
}
