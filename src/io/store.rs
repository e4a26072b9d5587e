//! Object storage seam for the pipelines.
//!
//! Every read and write the pipelines perform goes through [`ObjectStore`], so the
//! same transform code runs against plain filesystem paths, `s3://bucket/key` URIs,
//! or the in-memory [`MemoryStore`](crate::io::memory::MemoryStore) used in tests.
//!
//! Locations are strings. A location of the form `scheme://bucket/key` names an
//! object; anything else is a filesystem path. [`LocalStore`] serves both, mapping
//! objects to `<bucket_root>/<bucket>/<key>`.
//!
//! ## Overwrite semantics
//! [`ObjectStore::put`] and [`ObjectStore::replace_prefix`] replace prior content in
//! full. [`LocalStore`] stages the new content next to the target and swaps it in
//! with a rename, so readers never see a half-written output. Two writers racing on
//! the same location are not isolated from each other.

use crate::error::EtlError;
use crate::io::glob::{expand_glob, is_pattern};
use anyhow::{Context, Result};
use std::fs::{self, create_dir_all};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// A parsed location string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location<'a> {
    /// `scheme://bucket/key`
    Object {
        scheme: &'a str,
        bucket: &'a str,
        key: &'a str,
    },
    /// A filesystem path.
    Path(&'a str),
}

impl<'a> Location<'a> {
    /// Split a location string into its parts.
    #[must_use]
    pub fn parse(s: &'a str) -> Self {
        match s.split_once("://") {
            Some((scheme, rest)) if !scheme.is_empty() && !scheme.contains('/') => {
                let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));
                Self::Object {
                    scheme,
                    bucket,
                    key,
                }
            }
            _ => Self::Path(s),
        }
    }
}

/// Join a prefix location and a relative key with exactly one `/`.
#[must_use]
pub fn join_location(prefix: &str, relative: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let relative = relative.trim_start_matches('/');
    if prefix.is_empty() {
        relative.to_string()
    } else {
        format!("{prefix}/{relative}")
    }
}

/// Blocking object storage used by the extractor and the loader.
pub trait ObjectStore: Send + Sync {
    /// Read the whole object at `location`.
    ///
    /// # Errors
    /// [`EtlError::SourceUnavailable`] if nothing exists there; other I/O errors as-is.
    fn get(&self, location: &str) -> Result<Vec<u8>>;

    /// List the objects matching a glob pattern, sorted, in the pattern's scheme.
    ///
    /// # Errors
    /// Returns an error if the pattern is invalid or the listing fails.
    fn list(&self, pattern: &str) -> Result<Vec<String>>;

    /// Create or fully replace the object at `location`.
    ///
    /// # Errors
    /// [`EtlError::WriteFailure`] when the object cannot be written.
    fn put(&self, location: &str, data: &[u8]) -> Result<()>;

    /// Replace everything under `prefix` with `objects` (keys relative to `prefix`).
    ///
    /// # Errors
    /// [`EtlError::WriteFailure`] when any object cannot be written; prior content
    /// under `prefix` is then left untouched.
    fn replace_prefix(&self, prefix: &str, objects: &[(String, Vec<u8>)]) -> Result<()>;
}

/// Filesystem-backed [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct LocalStore {
    bucket_root: PathBuf,
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new(".")
    }
}

impl LocalStore {
    /// Store whose buckets live as directories under `bucket_root`.
    pub fn new(bucket_root: impl Into<PathBuf>) -> Self {
        Self {
            bucket_root: bucket_root.into(),
        }
    }

    #[must_use]
    pub fn bucket_root(&self) -> &Path {
        &self.bucket_root
    }

    /// Filesystem path backing `location`. Trailing slashes are dropped.
    #[must_use]
    pub fn resolve(&self, location: &str) -> PathBuf {
        match Location::parse(location) {
            Location::Object { bucket, key, .. } => self
                .bucket_root
                .join(bucket)
                .join(key.trim_end_matches('/')),
            Location::Path(p) if p.len() > 1 => PathBuf::from(p.trim_end_matches('/')),
            Location::Path(p) => PathBuf::from(p),
        }
    }

    fn write_failure(location: &str, err: impl std::fmt::Display) -> anyhow::Error {
        EtlError::write_failure(location, err).into()
    }
}

impl ObjectStore for LocalStore {
    fn get(&self, location: &str) -> Result<Vec<u8>> {
        let path = self.resolve(location);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(EtlError::source_unavailable(location).into())
            }
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    fn list(&self, pattern: &str) -> Result<Vec<String>> {
        match Location::parse(pattern) {
            Location::Object {
                scheme,
                bucket,
                key,
            } => {
                let base = self.bucket_root.join(bucket);
                let base_str = base.to_string_lossy();
                let fs_pattern = format!("{}/{key}", glob::Pattern::escape(&base_str));
                let mut out = Vec::new();
                for path in expand_glob(&fs_pattern)? {
                    let rel = path
                        .strip_prefix(&base)
                        .with_context(|| format!("{} escaped {}", path.display(), base.display()))?;
                    let rel = rel.to_string_lossy().replace('\\', "/");
                    out.push(format!("{scheme}://{bucket}/{rel}"));
                }
                Ok(out)
            }
            Location::Path(p) if is_pattern(p) => Ok(expand_glob(p)?
                .into_iter()
                .map(|path| path.to_string_lossy().into_owned())
                .collect()),
            Location::Path(p) => Ok(if Path::new(p).is_file() {
                vec![p.to_string()]
            } else {
                Vec::new()
            }),
        }
    }

    fn put(&self, location: &str, data: &[u8]) -> Result<()> {
        let path = self.resolve(location);
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        create_dir_all(&parent).map_err(|e| Self::write_failure(location, e))?;

        let mut staged =
            tempfile::NamedTempFile::new_in(&parent).map_err(|e| Self::write_failure(location, e))?;
        staged
            .write_all(data)
            .and_then(|()| staged.flush())
            .map_err(|e| Self::write_failure(location, e))?;
        staged
            .persist(&path)
            .map_err(|e| Self::write_failure(location, e.error))?;
        Ok(())
    }

    fn replace_prefix(&self, prefix: &str, objects: &[(String, Vec<u8>)]) -> Result<()> {
        let target = self.resolve(prefix);
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        create_dir_all(&parent).map_err(|e| Self::write_failure(prefix, e))?;

        let staging = tempfile::Builder::new()
            .prefix(".labour-etl-staging-")
            .tempdir_in(&parent)
            .map_err(|e| Self::write_failure(prefix, e))?;
        for (rel, bytes) in objects {
            let path = staging.path().join(rel);
            if let Some(dir) = path.parent() {
                create_dir_all(dir).map_err(|e| Self::write_failure(prefix, e))?;
            }
            fs::write(&path, bytes).map_err(|e| Self::write_failure(prefix, e))?;
        }

        // Move the old tree aside first; it is deleted when `retired` drops.
        let retired = tempfile::Builder::new()
            .prefix(".labour-etl-retired-")
            .tempdir_in(&parent)
            .map_err(|e| Self::write_failure(prefix, e))?;
        if target.exists() {
            fs::rename(&target, retired.path().join("old"))
                .map_err(|e| Self::write_failure(prefix, e))?;
        }
        if let Err(e) = fs::rename(staging.path(), &target) {
            let _ = fs::rename(retired.path().join("old"), &target);
            return Err(Self::write_failure(prefix, e));
        }
        Ok(())
    }
}
