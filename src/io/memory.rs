//! In-memory [`ObjectStore`] for tests.
//!
//! Objects are kept in a map keyed by their full location string, so
//! `s3://bucket/key` and `data/file.csv` can live side by side. Clones share state.

use crate::error::EtlError;
use crate::io::glob::matches;
use crate::io::store::{ObjectStore, join_location};
use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

type Objects = Arc<Mutex<BTreeMap<String, Vec<u8>>>>;

#[derive(Clone, Default)]
pub struct MemoryStore {
    objects: Objects,
    read_only: Arc<Mutex<BTreeSet<String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.objects.lock().expect("objects mutex poisoned")
    }

    /// Make every write at or below `prefix` fail with [`EtlError::WriteFailure`].
    pub fn deny_writes(&self, prefix: &str) {
        self.read_only
            .lock()
            .expect("read_only mutex poisoned")
            .insert(prefix.trim_end_matches('/').to_string());
    }

    fn check_writable(&self, location: &str) -> Result<()> {
        let denied = self.read_only.lock().expect("read_only mutex poisoned");
        if denied
            .iter()
            .any(|p| location == p || location.starts_with(&format!("{p}/")))
        {
            return Err(EtlError::write_failure(location, "permission denied").into());
        }
        Ok(())
    }

    /// All stored locations, sorted.
    #[must_use]
    pub fn locations(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// Locations stored under `prefix`, relative to it.
    #[must_use]
    pub fn keys_under(&self, prefix: &str) -> Vec<String> {
        let dir = format!("{}/", prefix.trim_end_matches('/'));
        self.lock()
            .keys()
            .filter_map(|k| k.strip_prefix(&dir).map(ToString::to_string))
            .collect()
    }
}

impl ObjectStore for MemoryStore {
    fn get(&self, location: &str) -> Result<Vec<u8>> {
        self.lock()
            .get(location)
            .cloned()
            .ok_or_else(|| EtlError::source_unavailable(location).into())
    }

    fn list(&self, pattern: &str) -> Result<Vec<String>> {
        let objects = self.lock();
        let mut out = Vec::new();
        for key in objects.keys() {
            if matches(pattern, key)? {
                out.push(key.clone());
            }
        }
        Ok(out)
    }

    fn put(&self, location: &str, data: &[u8]) -> Result<()> {
        self.check_writable(location)?;
        self.lock().insert(location.to_string(), data.to_vec());
        Ok(())
    }

    fn replace_prefix(&self, prefix: &str, objects: &[(String, Vec<u8>)]) -> Result<()> {
        self.check_writable(prefix)?;
        let dir = format!("{}/", prefix.trim_end_matches('/'));
        let mut stored = self.lock();
        stored.retain(|k, _| !k.starts_with(&dir));
        for (rel, bytes) in objects {
            stored.insert(join_location(prefix, rel), bytes.clone());
        }
        Ok(())
    }
}
