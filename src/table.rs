//! In-memory representation of an extracted source table.
//!
//! A [`RawTable`] is a header plus string rows, exactly as read from the delimited
//! source. Every row is padded or truncated to the header width when the table is
//! built, so a cell lookup by column index never goes out of bounds.

use crate::error::EtlError;
use std::collections::HashMap;

/// Header plus rows of untyped cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    source: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table, normalizing every row to the header width.
    pub fn new(source: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self {
            source: source.into(),
            headers,
            rows,
        }
    }

    /// Where the table came from (a path, an object URI, or a glob pattern).
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header, if present.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Resolve every name in `names` to a column index.
    ///
    /// # Errors
    /// Returns [`EtlError::MalformedInput`] listing every missing column.
    pub fn require_columns(&self, names: &[&str]) -> Result<Vec<usize>, EtlError> {
        let mut indices = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column(name) {
                Some(i) => indices.push(i),
                None => missing.push(*name),
            }
        }
        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(EtlError::malformed(
                &self.source,
                format!("missing required column(s): {}", missing.join(", ")),
            ))
        }
    }

    /// Keep only the rows matching `pred`.
    #[must_use]
    pub fn filter(&self, pred: impl Fn(&[String]) -> bool) -> Self {
        Self {
            source: self.source.clone(),
            headers: self.headers.clone(),
            rows: self.rows.iter().filter(|r| pred(r)).cloned().collect(),
        }
    }

    /// Project onto `names`, in that order.
    ///
    /// # Errors
    /// Returns [`EtlError::MalformedInput`] if any column is absent.
    pub fn select(&self, names: &[&str]) -> Result<Self, EtlError> {
        let indices = self.require_columns(names)?;
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok(Self {
            source: self.source.clone(),
            headers: names.iter().map(ToString::to_string).collect(),
            rows,
        })
    }

    /// Stack tables vertically, aligning columns by name.
    ///
    /// The result's header is the union of all headers in first-seen order; a table
    /// lacking one of those columns contributes empty cells for it. Rows are kept in
    /// input order and never deduplicated.
    #[must_use]
    pub fn concat(source: impl Into<String>, tables: Vec<Self>) -> Self {
        let mut headers: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for t in &tables {
            for h in &t.headers {
                if !positions.contains_key(h) {
                    positions.insert(h.clone(), headers.len());
                    headers.push(h.clone());
                }
            }
        }

        let total: usize = tables.iter().map(Self::len).sum();
        let mut rows = Vec::with_capacity(total);
        for t in tables {
            let mapping: Vec<usize> = t.headers.iter().map(|h| positions[h]).collect();
            for row in t.rows {
                let mut out = vec![String::new(); headers.len()];
                for (cell, &pos) in row.into_iter().zip(&mapping) {
                    out[pos] = cell;
                }
                rows.push(out);
            }
        }

        Self {
            source: source.into(),
            headers,
            rows,
        }
    }
}
