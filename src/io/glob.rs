//! File globbing for multi-file sources.
//!
//! The quarterly vacancy table ships as one CSV per region in a single directory;
//! its input location is a pattern such as `data/Canada Quarterly/*.csv`.
//!
//! # Examples
//!
//! ```no_run
//! use labour_etl::io::glob::expand_glob;
//!
//! let files = expand_glob("data/Canada Quarterly/*.csv")?;
//! # use anyhow::Error; Ok::<(), Error>(())
//! ```

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern, glob_with};
use std::path::PathBuf;

/// `*` and `?` never cross a `/`, matching object-store prefix listings.
pub const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Whether `s` contains glob metacharacters.
#[must_use]
pub fn is_pattern(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// Expand a glob pattern into a sorted list of matching files.
///
/// Directories are skipped. Zero matches is not an error here.
///
/// # Errors
/// Returns an error if the pattern is invalid or a directory entry cannot be read.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob_with(pattern, MATCH_OPTIONS)
        .with_context(|| format!("invalid glob pattern: {pattern}"))?;

    let mut result = Vec::new();
    for entry in paths {
        let path =
            entry.with_context(|| format!("error reading glob entry for pattern: {pattern}"))?;
        if path.is_file() {
            result.push(path);
        }
    }

    result.sort();
    Ok(result)
}

/// Match a single key against a pattern with [`MATCH_OPTIONS`].
///
/// # Errors
/// Returns an error if the pattern is invalid.
pub fn matches(pattern: &str, candidate: &str) -> Result<bool> {
    let p = Pattern::new(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;
    Ok(p.matches_with(candidate, MATCH_OPTIONS))
}
